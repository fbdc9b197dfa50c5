//! Data-driven content for the movement rules.
//!
//! Loaders read tuning values (TOML) and static map layouts (RON) into the
//! `move-core` types that back the engine's oracles. Content never appears
//! in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapLoader};
