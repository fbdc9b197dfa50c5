//! Error types surfaced at the engine boundary.

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// The caller broke the engine's contract. The state is untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("the player cannot act in arena mode")]
    ArenaMode {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("player position {position} is outside the map")]
    PlayerOutOfBounds {
        position: Position,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("player is embedded in solid terrain at {position}")]
    PlayerInSolidTerrain {
        position: Position,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ExecuteError {
    pub fn arena_mode(nonce: u64) -> Self {
        Self::ArenaMode {
            context: ErrorContext::new(nonce)
                .with_actor(EntityId::PLAYER)
                .with_message("arena mode"),
        }
    }

    pub fn player_out_of_bounds(position: Position, nonce: u64) -> Self {
        Self::PlayerOutOfBounds {
            position,
            context: ErrorContext::new(nonce)
                .with_actor(EntityId::PLAYER)
                .with_position(position),
        }
    }

    pub fn player_in_solid_terrain(position: Position, nonce: u64) -> Self {
        Self::PlayerInSolidTerrain {
            position,
            context: ErrorContext::new(nonce)
                .with_actor(EntityId::PLAYER)
                .with_position(position),
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::ArenaMode { context }
            | Self::PlayerOutOfBounds { context, .. }
            | Self::PlayerInSolidTerrain { context, .. } => Some(context),
            Self::Oracle(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ArenaMode { .. } => "EXECUTE_ARENA_MODE",
            Self::PlayerOutOfBounds { .. } => "EXECUTE_PLAYER_OUT_OF_BOUNDS",
            Self::PlayerInSolidTerrain { .. } => "EXECUTE_PLAYER_IN_SOLID_TERRAIN",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_are_fatal() {
        let error = ExecuteError::player_in_solid_terrain(Position::new(3, 4), 7);
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert_eq!(error.error_code(), "EXECUTE_PLAYER_IN_SOLID_TERRAIN");
        let context = error.context().unwrap();
        assert_eq!(context.nonce, 7);
        assert_eq!(context.position, Some(Position::new(3, 4)));
    }

    #[test]
    fn oracle_errors_keep_their_code() {
        let error = ExecuteError::from(OracleError::RngNotAvailable);
        assert_eq!(error.error_code(), "ORACLE_RNG_NOT_AVAILABLE");
        assert!(error.context().is_none());
    }
}
