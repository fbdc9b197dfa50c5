//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors raised while building or editing a [`GameState`](super::GameState)
/// outside of turn resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("monster list is full (max: {max})")]
    MonsterListFull { max: usize },

    #[error("entity {0} is reserved for the player")]
    ReservedId(EntityId),

    #[error("monster {0} already exists")]
    DuplicateMonster(EntityId),

    #[error("monster {0} not found")]
    MonsterNotFound(EntityId),

    /// Position is already occupied by another entity.
    #[error("position {position} is already occupied by entity {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: EntityId,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            MonsterListFull { .. } | ReservedId(_) | DuplicateMonster(_) | PositionOccupied { .. } => {
                ErrorSeverity::Validation
            }
            MonsterNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            MonsterListFull { .. } => "STATE_MONSTER_LIST_FULL",
            ReservedId(_) => "STATE_RESERVED_ID",
            DuplicateMonster(_) => "STATE_DUPLICATE_MONSTER",
            MonsterNotFound(_) => "STATE_MONSTER_NOT_FOUND",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
        }
    }
}
