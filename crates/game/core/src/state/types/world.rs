use std::collections::{BTreeMap, BTreeSet};

use crate::env::{MapOracle, TerrainKind};

use super::{EntityId, Position};

/// Runtime world data layered on top of the static map.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub tile_map: TileMap,
    /// Terrain changed since the map was loaded (doors, dug rock, bog).
    terrain_overrides: BTreeMap<Position, TerrainKind>,
    /// Traps the player knows about.
    pub known_traps: BTreeSet<Position>,
    pub clouds: BTreeMap<Position, Cloud>,
    pub sanctuary: BTreeSet<Position>,
    /// Cells excluded from automatic travel.
    pub travel_exclusions: BTreeSet<Position>,
    /// Doors that refuse to open, with an optional custom reason.
    pub door_vetoes: BTreeMap<Position, Option<String>>,
    pub travel_trail: Vec<Position>,
    pub in_abyss: bool,
}

impl WorldState {
    pub fn new(tile_map: TileMap) -> Self {
        Self {
            tile_map,
            ..Self::default()
        }
    }

    /// Terrain at `position`, with runtime overrides applied.
    pub fn terrain_at<M>(&self, map: &M, position: Position) -> Option<TerrainKind>
    where
        M: MapOracle + ?Sized,
    {
        if let Some(terrain) = self.terrain_overrides.get(&position) {
            return Some(*terrain);
        }
        map.tile(position).map(|tile| tile.terrain())
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        self.terrain_overrides.insert(position, terrain);
    }

    pub fn is_sanctuary(&self, position: Position) -> bool {
        self.sanctuary.contains(&position)
    }

    pub fn harmful_cloud_at(&self, position: Position) -> Option<&Cloud> {
        self.clouds
            .get(&position)
            .filter(|cloud| cloud.kind.is_harmful())
    }

    /// Places a cloud unless one is already there.
    pub fn place_cloud(&mut self, position: Position, cloud: Cloud) -> bool {
        if self.clouds.contains_key(&position) {
            return false;
        }
        self.clouds.insert(position, cloud);
        true
    }
}

/// Monster occupancy. The player is tracked separately on `PlayerState`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    occupancy: BTreeMap<Position, EntityId>,
}

impl TileMap {
    pub fn occupant(&self, position: &Position) -> Option<EntityId> {
        self.occupancy.get(position).copied()
    }

    pub fn is_occupied(&self, position: &Position) -> bool {
        self.occupancy.contains_key(position)
    }

    /// Returns false if the tile already holds a different monster.
    pub fn add_occupant(&mut self, position: Position, entity: EntityId) -> bool {
        match self.occupancy.get(&position) {
            Some(existing) => *existing == entity,
            None => {
                self.occupancy.insert(position, entity);
                true
            }
        }
    }

    pub fn remove_occupant(&mut self, position: &Position, entity: EntityId) -> bool {
        if self.occupancy.get(position) == Some(&entity) {
            self.occupancy.remove(position);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CloudKind {
    Fire,
    Freezing,
    Poison,
    Steam,
    Mist,
    Smoke,
}

impl CloudKind {
    pub fn is_harmful(self) -> bool {
        matches!(
            self,
            CloudKind::Fire | CloudKind::Freezing | CloudKind::Poison | CloudKind::Steam
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cloud {
    pub kind: CloudKind,
    pub duration: u32,
    pub source: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridMap;

    #[test]
    fn overrides_shadow_static_terrain() {
        let map = GridMap::filled(3, 3, TerrainKind::Floor);
        let mut world = WorldState::default();
        let door = Position::new(1, 1);
        assert_eq!(world.terrain_at(&map, door), Some(TerrainKind::Floor));

        world.set_terrain(door, TerrainKind::OpenDoor);
        assert_eq!(world.terrain_at(&map, door), Some(TerrainKind::OpenDoor));
        assert_eq!(world.terrain_at(&map, Position::new(9, 9)), None);
    }

    #[test]
    fn occupancy_refuses_a_second_monster() {
        let mut tiles = TileMap::default();
        let spot = Position::new(2, 2);
        assert!(tiles.add_occupant(spot, EntityId(1)));
        assert!(!tiles.add_occupant(spot, EntityId(2)));
        assert!(!tiles.remove_occupant(&spot, EntityId(2)));
        assert!(tiles.remove_occupant(&spot, EntityId(1)));
        assert!(tiles.is_empty());
    }

    #[test]
    fn existing_cloud_is_not_replaced() {
        let mut world = WorldState::default();
        let spot = Position::new(0, 0);
        let fire = Cloud {
            kind: CloudKind::Fire,
            duration: 5,
            source: None,
        };
        assert!(world.place_cloud(spot, fire));
        assert!(!world.place_cloud(
            spot,
            Cloud {
                kind: CloudKind::Mist,
                ..fire
            }
        ));
        assert_eq!(world.harmful_cloud_at(spot).map(|c| c.kind), Some(CloudKind::Fire));
    }
}
