//! Traits describing the world the turn resolver runs against.
//!
//! Oracles expose read-only data (static map geometry, movement rules, a
//! deterministic random source). The [`Env`] aggregate bundles them so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations. Side-effecting collaborators live in [`services`].
mod config;
mod error;
mod grid;
mod map;
mod rng;
pub mod services;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use grid::{GridError, GridMap};
pub use map::{DoorState, MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use services::{
    CombatResolver, ConductKind, EffectBus, MessageChannel, MessageSink, PromptService, Services,
};

use crate::config::MoveConfig;

/// Aggregates read-only oracles required by the turn resolver.
pub struct Env<'a, M, C, R>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
}

impl<M, C, R> Clone for Env<'_, M, C, R>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, C, R> Copy for Env<'_, M, C, R>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn ConfigOracle + 'a, dyn RngOracle + 'a>;

impl<'a, M, C, R> Env<'a, M, C, R>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(map: Option<&'a M>, config: Option<&'a C>, rng: Option<&'a R>) -> Self {
        Self { map, config, rng }
    }

    pub fn with_all(map: &'a M, config: &'a C, rng: &'a R) -> Self {
        Self::new(Some(map), Some(config), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            config: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Movement rules from the config oracle, or the defaults when none is set.
    pub fn move_config(&self) -> MoveConfig {
        self.config
            .map(|config| config.move_config())
            .unwrap_or_default()
    }
}

impl<'a, M, C, R> Env<'a, M, C, R>
where
    M: MapOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, config, rng)
    }
}
