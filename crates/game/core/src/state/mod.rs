//! Authoritative game state representation.
//!
//! The player, the monster table and the runtime world overlays. The turn
//! resolver borrows this mutably for the duration of a single command.
mod error;
pub mod types;

use arrayvec::ArrayVec;

use crate::config::MoveConfig;
use crate::env::{MapOracle, TerrainKind};

pub use error::StateError;
pub use types::{
    Attitude, Capabilities, Cloud, CloudKind, Constriction, Deity, EntityId, ExpiringProtection,
    Gait, MonsterFlags, MonsterKind, MonsterState, PlayerState, Position, ResourceMeter,
    Restraint, RunMode, StatusEffect, StatusEffects, StatusKind, TileMap, TravelState, TurnState,
    WorldState,
};

type Monsters = ArrayVec<MonsterState, { MoveConfig::MAX_MONSTERS }>;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `turn.nonce` to generate unique seeds for each random event.
    pub game_seed: u64,

    pub turn: TurnState,
    pub player: PlayerState,
    monsters: Monsters,
    /// Runtime world data layered on top of the static map.
    pub world: WorldState,
}

impl GameState {
    pub fn new(player: PlayerState) -> Self {
        Self::with_seed(0, player)
    }

    pub fn with_seed(game_seed: u64, player: PlayerState) -> Self {
        Self {
            game_seed,
            turn: TurnState::default(),
            player,
            monsters: ArrayVec::new(),
            world: WorldState::default(),
        }
    }

    // ------------------------------------------------------------------
    // Monsters
    // ------------------------------------------------------------------

    /// Adds a monster to the table and the occupancy map.
    ///
    /// # Errors
    ///
    /// Fails if the id is taken or reserved, the tile is occupied, or the
    /// table is full.
    pub fn spawn_monster(&mut self, monster: MonsterState) -> Result<EntityId, StateError> {
        let id = monster.id;
        if id.is_player() {
            return Err(StateError::ReservedId(id));
        }
        if self.monster(id).is_some() {
            return Err(StateError::DuplicateMonster(id));
        }
        if monster.position == self.player.position {
            return Err(StateError::PositionOccupied {
                position: monster.position,
                occupant: EntityId::PLAYER,
            });
        }
        if let Some(occupant) = self.world.tile_map.occupant(&monster.position) {
            return Err(StateError::PositionOccupied {
                position: monster.position,
                occupant,
            });
        }
        if self.monsters.is_full() {
            return Err(StateError::MonsterListFull {
                max: MoveConfig::MAX_MONSTERS,
            });
        }

        self.world.tile_map.add_occupant(monster.position, id);
        self.monsters.push(monster);
        Ok(id)
    }

    pub fn monster(&self, id: EntityId) -> Option<&MonsterState> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut MonsterState> {
        self.monsters.iter_mut().find(|monster| monster.id == id)
    }

    pub fn monster_at(&self, position: Position) -> Option<&MonsterState> {
        self.world
            .tile_map
            .occupant(&position)
            .and_then(|id| self.monster(id))
    }

    /// Relocates a monster. The destination must not hold another monster.
    ///
    /// # Errors
    ///
    /// Fails if the monster is unknown or the destination is taken.
    pub fn move_monster(&mut self, id: EntityId, destination: Position) -> Result<(), StateError> {
        let origin = self
            .monster(id)
            .map(|monster| monster.position)
            .ok_or(StateError::MonsterNotFound(id))?;
        if let Some(occupant) = self.world.tile_map.occupant(&destination)
            && occupant != id
        {
            return Err(StateError::PositionOccupied {
                position: destination,
                occupant,
            });
        }

        self.world.tile_map.remove_occupant(&origin, id);
        self.world.tile_map.add_occupant(destination, id);
        if let Some(monster) = self.monster_mut(id) {
            monster.position = destination;
        }
        Ok(())
    }

    /// Exchanges the tiles of two monsters.
    ///
    /// # Errors
    ///
    /// Fails if either monster is unknown.
    pub fn swap_monsters(&mut self, first: EntityId, second: EntityId) -> Result<(), StateError> {
        let first_position = self
            .monster(first)
            .map(|monster| monster.position)
            .ok_or(StateError::MonsterNotFound(first))?;
        let second_position = self
            .monster(second)
            .map(|monster| monster.position)
            .ok_or(StateError::MonsterNotFound(second))?;

        let tiles = &mut self.world.tile_map;
        tiles.remove_occupant(&first_position, first);
        tiles.remove_occupant(&second_position, second);
        tiles.add_occupant(second_position, first);
        tiles.add_occupant(first_position, second);

        if let Some(monster) = self.monster_mut(first) {
            monster.position = second_position;
        }
        if let Some(monster) = self.monster_mut(second) {
            monster.position = first_position;
        }
        Ok(())
    }

    /// Removes a monster from play, clearing every reference the player holds to it.
    pub fn remove_monster(&mut self, id: EntityId) -> Option<MonsterState> {
        let index = self.monsters.iter().position(|monster| monster.id == id)?;
        let monster = self.monsters.remove(index);
        self.world.tile_map.remove_occupant(&monster.position, id);

        let player = &mut self.player;
        player.beholders.retain(|other| *other != id);
        player.fearmongers.retain(|other| *other != id);
        player.constriction.constricting.retain(|other| *other != id);
        if player.constriction.constricted_by == Some(id) {
            player.constriction.constricted_by = None;
        }
        if player.water_holder == Some(id) {
            player.water_holder = None;
        }
        Some(monster)
    }

    // ------------------------------------------------------------------
    // Terrain
    // ------------------------------------------------------------------

    /// Terrain at `position`, with runtime overrides applied.
    pub fn terrain_at<M>(&self, map: &M, position: Position) -> Option<TerrainKind>
    where
        M: MapOracle + ?Sized,
    {
        self.world.terrain_at(map, position)
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        self.world.set_terrain(position, terrain);
    }

    pub fn is_solid<M>(&self, map: &M, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        self.terrain_at(map, position)
            .is_none_or(|terrain| terrain.is_solid())
    }

    // ------------------------------------------------------------------
    // Movement restrictions
    // ------------------------------------------------------------------

    /// A beholder the player would move away from by stepping onto `destination`.
    pub fn beholder_blocking(&self, destination: Position) -> Option<&MonsterState> {
        let origin = self.player.position;
        self.player
            .beholders
            .iter()
            .filter_map(|id| self.monster(*id))
            .find(|monster| destination.distance(monster.position) > origin.distance(monster.position))
    }

    /// A fearmonger the player would move closer to by stepping onto `destination`.
    pub fn fearmonger_blocking(&self, destination: Position) -> Option<&MonsterState> {
        let origin = self.player.position;
        self.player
            .fearmongers
            .iter()
            .filter_map(|id| self.monster(*id))
            .find(|monster| destination.distance(monster.position) < origin.distance(monster.position))
    }
}
