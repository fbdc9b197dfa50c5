//! Configuration oracle for exposing movement rules to the engine.

use crate::config::MoveConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Returns the movement rules in effect.
    fn move_config(&self) -> MoveConfig;
}

impl ConfigOracle for MoveConfig {
    fn move_config(&self) -> MoveConfig {
        *self
    }
}
