//! Command execution entry point.
//!
//! The [`GameEngine`] is the only way player commands mutate [`GameState`].
//! It checks the calling contract, builds a [`TurnContext`], runs the
//! matching pipeline and advances the action nonce so the next command draws
//! fresh random numbers.

mod errors;

pub use errors::ExecuteError;

use tracing::{debug, warn};

use crate::action::{Delta, MoveRequest, TurnContext, TurnOutcome, door, move_player};
use crate::env::{GameEnv, Services};
use crate::state::GameState;

/// A player command the engine knows how to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerCommand {
    Move(MoveRequest),
    OpenDoor(Delta),
    CloseDoor(Delta),
}

impl PlayerCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::OpenDoor(_) => "open_door",
            Self::CloseDoor(_) => "close_door",
        }
    }
}

impl From<MoveRequest> for PlayerCommand {
    fn from(request: MoveRequest) -> Self {
        Self::Move(request)
    }
}

/// Resolves player commands against a borrowed [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes one command.
    ///
    /// Player-facing failures are reported through the returned
    /// [`TurnOutcome`] and the message sink, never as errors.
    ///
    /// # Errors
    ///
    /// Returns an [`ExecuteError`] when the call violates the engine's
    /// contract: arena mode, a missing oracle, or a player standing outside
    /// the map or inside solid terrain without the wizard-mode override.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        services: &mut Services<'_>,
        command: PlayerCommand,
    ) -> Result<TurnOutcome, ExecuteError> {
        self.validate_contract(&env)?;

        let mut ctx = TurnContext::new(self.state, &env, services)?;
        match command {
            PlayerCommand::Move(request) => move_player(&mut ctx, request),
            PlayerCommand::OpenDoor(delta) => door::open_door(&mut ctx, delta),
            PlayerCommand::CloseDoor(delta) => door::close_door(&mut ctx, delta),
        }
        let outcome = ctx.finish();

        self.state.turn.nonce += 1;

        debug!(
            command = command.as_str(),
            action = %outcome.action,
            outcome = ?outcome.outcome,
            time = outcome.time_taken,
            turn_over = outcome.turn_is_over,
            position = %self.state.player.position,
            nonce = self.state.turn.nonce,
            "command resolved"
        );
        Ok(outcome)
    }

    /// Shorthand for a [`PlayerCommand::Move`].
    ///
    /// # Errors
    ///
    /// See [`GameEngine::execute`].
    pub fn move_player(
        &mut self,
        env: GameEnv<'_>,
        services: &mut Services<'_>,
        request: MoveRequest,
    ) -> Result<TurnOutcome, ExecuteError> {
        self.execute(env, services, PlayerCommand::Move(request))
    }

    fn validate_contract(&self, env: &GameEnv<'_>) -> Result<(), ExecuteError> {
        let nonce = self.state.turn.nonce;
        let position = self.state.player.position;

        if self.state.turn.arena {
            warn!(nonce, "player command issued in arena mode");
            return Err(ExecuteError::arena_mode(nonce));
        }

        let map = env.map()?;
        env.rng()?;

        if !map.contains(position) {
            warn!(%position, nonce, "player outside the map");
            return Err(ExecuteError::player_out_of_bounds(position, nonce));
        }
        if self.state.is_solid(map, position) && !self.state.player.wizmode_teleported_into_rock {
            warn!(%position, nonce, "player inside solid terrain");
            return Err(ExecuteError::player_in_solid_terrain(position, nonce));
        }
        Ok(())
    }
}
