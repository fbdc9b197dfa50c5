//! Turn context threaded through every stage of a resolution.
//!
//! This module provides:
//! - `TurnContext`: mutable state, oracles, collaborators and the outcome in progress
//! - deterministic dice helpers seeded from the action nonce
//! - message and prompt shorthands

use crate::config::MoveConfig;
use crate::env::{
    GameEnv, MapOracle, MessageChannel, OracleError, RngOracle, Services, TerrainKind,
    compute_seed,
};
use crate::state::{EntityId, GameState, Position};

use crate::action::{ActionKind, Outcome, TurnOutcome};

// ============================================================================
// Turn Context
// ============================================================================

/// Everything a stage may read or mutate while resolving one command.
pub struct TurnContext<'a, 's> {
    /// Mutable game state, exclusively borrowed for the whole call.
    pub state: &'a mut GameState,

    pub map: &'a dyn MapOracle,

    rng: &'a dyn RngOracle,

    pub config: MoveConfig,

    pub services: &'a mut Services<'s>,

    /// Outcome record filled in as stages commit.
    pub outcome: TurnOutcome,

    /// Unscaled cost of a move this turn. Walking through plants raises it.
    pub base_time: u32,

    /// Player position after any lunge; post-move god hooks measure from here.
    pub initial_position: Position,

    /// Number of random rolls made so far; feeds the seed context.
    rolls: u32,
}

impl<'a, 's> TurnContext<'a, 's> {
    /// # Errors
    ///
    /// Returns an [`OracleError`] when the map or rng oracle is missing.
    pub fn new(
        state: &'a mut GameState,
        env: &GameEnv<'a>,
        services: &'a mut Services<'s>,
    ) -> Result<Self, OracleError> {
        let map = env.map()?;
        let rng = env.rng()?;
        let config = env.move_config();
        let base_time = state.player.action_delay;
        let initial_position = state.player.position;

        Ok(Self {
            state,
            map,
            rng,
            config,
            services,
            outcome: TurnOutcome::aborted(),
            base_time,
            initial_position,
            rolls: 0,
        })
    }

    pub fn finish(self) -> TurnOutcome {
        self.outcome
    }

    // ------------------------------------------------------------------
    // World queries
    // ------------------------------------------------------------------

    pub fn player_position(&self) -> Position {
        self.state.player.position
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.map.contains(position)
    }

    /// Terrain with runtime overrides, `None` outside the map.
    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        if !self.in_bounds(position) {
            return None;
        }
        self.state.terrain_at(self.map, position)
    }

    pub fn is_solid(&self, position: Position) -> bool {
        self.terrain(position).is_none_or(|terrain| terrain.is_solid())
    }

    pub fn monster_id_at(&self, position: Position) -> Option<EntityId> {
        self.state.monster_at(position).map(|monster| monster.id)
    }

    pub fn monster_name(&self, id: EntityId) -> String {
        self.state
            .monster(id)
            .map(|monster| monster.the_name())
            .unwrap_or_else(|| "something".to_string())
    }

    // ------------------------------------------------------------------
    // Outcome bookkeeping
    // ------------------------------------------------------------------

    /// Ends the turn having spent `time`.
    pub fn end_turn(&mut self, action: ActionKind, outcome: Outcome, time: u32) {
        self.outcome.action = action;
        self.outcome.outcome = outcome;
        self.outcome.time_taken = time;
        self.outcome.turn_is_over = true;
    }

    /// Resolves without spending the turn.
    pub fn fail(&mut self, action: ActionKind) {
        self.outcome.action = action;
        self.outcome.outcome = Outcome::Fail;
        self.outcome.time_taken = 0;
        self.outcome.turn_is_over = false;
    }

    /// Discards the input; nothing was spent.
    pub fn abort(&mut self) {
        let cancel_repeat = self.outcome.cancel_repeat;
        self.outcome = TurnOutcome::aborted();
        self.outcome.cancel_repeat = cancel_repeat;
    }

    /// Unscaled delay of a non-movement action.
    pub fn action_delay(&self) -> u32 {
        self.state.player.action_delay
    }

    // ------------------------------------------------------------------
    // Messages and prompts
    // ------------------------------------------------------------------

    pub fn say(&mut self, text: &str) {
        self.services.messages.notify(text, MessageChannel::Plain);
    }

    pub fn notify(&mut self, text: &str, channel: MessageChannel) {
        self.services.messages.notify(text, channel);
    }

    /// Yes/no prompt. Always yes when confirmations are disabled.
    pub fn confirm(&mut self, text: &str, default: bool) -> bool {
        if self.state.turn.disable_confirmations {
            return true;
        }
        self.services.prompts.confirm(text, default)
    }

    /// Acknowledges a declined prompt.
    pub fn canned_ok(&mut self) {
        self.say("Okay, then.");
    }

    // ------------------------------------------------------------------
    // Dice
    // ------------------------------------------------------------------

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(
            self.state.game_seed,
            self.state.turn.nonce,
            EntityId::PLAYER.0,
            self.rolls,
        );
        self.rolls = self.rolls.wrapping_add(1);
        seed
    }

    /// Uniform in `0..n`; 0 when `n` is 0.
    pub fn random2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let seed = self.next_seed();
        self.rng.next_u32(seed) % n
    }

    /// True with probability `1/n`. A chance of 0 never fires.
    pub fn one_chance_in(&mut self, n: u32) -> bool {
        n != 0 && self.random2(n) == 0
    }

    /// Uniform in `low..=high`.
    pub fn random_range(&mut self, low: u32, high: u32) -> u32 {
        let seed = self.next_seed();
        self.rng.range(seed, low, high)
    }

    pub fn roll_d100(&mut self) -> u32 {
        let seed = self.next_seed();
        self.rng.roll_d100(seed)
    }

    /// Sum of `count` dice with `sides` faces.
    pub fn roll_dice(&mut self, count: u32, sides: u32) -> u32 {
        (0..count)
            .map(|_| {
                let seed = self.next_seed();
                self.rng.roll_die(seed, sides)
            })
            .sum()
    }

    /// `numerator / denominator`, rounding the remainder up with probability
    /// `remainder / denominator`.
    pub fn div_rand_round(&mut self, numerator: u32, denominator: u32) -> u32 {
        if denominator == 0 {
            return 0;
        }
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        if remainder == 0 {
            return quotient;
        }
        quotient + u32::from(self.random2(denominator) < remainder)
    }
}
