pub mod common;
pub mod monster;
pub mod player;
pub mod status;
pub mod turn;
pub mod world;

pub use common::{EntityId, Position, ResourceMeter};
pub use monster::{Attitude, MonsterFlags, MonsterKind, MonsterState};
pub use player::{
    Capabilities, Constriction, Deity, ExpiringProtection, Gait, PlayerState, Restraint,
};
pub use status::{StatusEffect, StatusEffects, StatusKind};
pub use turn::{RunMode, TravelState, TurnState};
pub use world::{Cloud, CloudKind, TileMap, WorldState};
