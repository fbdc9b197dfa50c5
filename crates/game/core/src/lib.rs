//! Deterministic player movement rules.
//!
//! `move-core` resolves one directional player command per call: confusion,
//! lunging, gates and prompts, pre/post-move effects and time accounting.
//! All state mutation flows through [`engine::GameEngine`]; rendering, combat
//! and other out-of-scope systems are reached through the collaborator
//! traits in [`env::services`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    ActionKind, CardinalDirection, Delta, MoveRequest, Outcome, Target, TurnContext, TurnOutcome,
};
pub use config::MoveConfig;
pub use engine::{ExecuteError, GameEngine, PlayerCommand};
pub use env::{
    CombatResolver, ConfigOracle, EffectBus, Env, GameEnv, GridMap, MapDimensions, MapOracle,
    MessageChannel, MessageSink, PcgRng, PromptService, RngOracle, Services, TerrainKind,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{EntityId, GameState, MonsterState, PlayerState, Position, WorldState};
