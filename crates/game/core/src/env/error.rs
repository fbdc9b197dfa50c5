//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors that occur when accessing Oracle data.
///
/// The engine cannot resolve a turn without a map or a random source, so
/// missing oracles are fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MapOracle is not available in the environment.
    #[error("MapOracle not available")]
    MapNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Position is outside the map bounds.
    #[error("position {0:?} is out of map bounds")]
    PositionOutOfBounds(Position),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,
            PositionOutOfBounds(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
        }
    }
}
