use crate::state::Position;

/// Static map oracle exposing immutable layout information.
///
/// Runtime changes (opened doors, dug walls, bog spread) live in
/// [`WorldState`](crate::state::WorldState) and are layered on top by
/// [`GameState::terrain_at`](crate::state::GameState::terrain_at).
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }
}

/// Terrain classes the movement rules distinguish between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Floor,
    ShallowWater,
    DeepWater,
    Lava,
    ToxicBog,
    RockWall,
    ClearRockWall,
    StoneWall,
    PermaRock,
    Tree,
    Grate,
    Statue,
    ClosedDoor,
    RunedDoor,
    SealedDoor,
    OpenDoor,
    MalignGateway,
    OpenSea,
    LavaSea,
}

/// State of a door cell, used by the door commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
    Open,
    Closed,
    Runed,
    Sealed,
}

impl TerrainKind {
    /// Solid cells block movement and line of fire regardless of the mover.
    pub fn is_solid(self) -> bool {
        use TerrainKind::*;
        matches!(
            self,
            RockWall
                | ClearRockWall
                | StoneWall
                | PermaRock
                | Tree
                | Grate
                | Statue
                | ClosedDoor
                | RunedDoor
                | SealedDoor
                | MalignGateway
                | OpenSea
                | LavaSea
        )
    }

    /// Solid cells that can still be seen through.
    pub fn is_transparent_wall(self) -> bool {
        use TerrainKind::*;
        matches!(
            self,
            ClearRockWall | Grate | Statue | MalignGateway | OpenSea | LavaSea
        )
    }

    pub fn is_diggable(self) -> bool {
        matches!(self, TerrainKind::RockWall | TerrainKind::ClearRockWall)
    }

    /// Walkable without any special protection.
    pub fn is_traversable(self) -> bool {
        !self.is_solid() && !self.is_dangerous()
    }

    /// Terrain that kills or maims an unprotected walker.
    pub fn is_dangerous(self) -> bool {
        matches!(self, TerrainKind::DeepWater | TerrainKind::Lava)
    }

    pub fn door_state(self) -> Option<DoorState> {
        match self {
            TerrainKind::OpenDoor => Some(DoorState::Open),
            TerrainKind::ClosedDoor => Some(DoorState::Closed),
            TerrainKind::RunedDoor => Some(DoorState::Runed),
            TerrainKind::SealedDoor => Some(DoorState::Sealed),
            _ => None,
        }
    }

    /// Closed, runed or sealed.
    pub fn is_closed_door(self) -> bool {
        matches!(
            self.door_state(),
            Some(DoorState::Closed | DoorState::Runed | DoorState::Sealed)
        )
    }

    /// Player-facing name with a definite article.
    pub fn description(self) -> &'static str {
        use TerrainKind::*;
        match self {
            Floor => "the floor",
            ShallowWater => "the shallow water",
            DeepWater => "the deep water",
            Lava => "the lava",
            ToxicBog => "the toxic bog",
            RockWall => "the rock wall",
            ClearRockWall => "the translucent rock wall",
            StoneWall => "the stone wall",
            PermaRock => "the unnaturally hard rock wall",
            Tree => "the tree",
            Grate => "the iron grate",
            Statue => "the statue",
            ClosedDoor => "the closed door",
            RunedDoor => "the runed door",
            SealedDoor => "the sealed door",
            OpenDoor => "the open door",
            MalignGateway => "the malign gateway",
            OpenSea => "the open sea",
            LavaSea => "the endless sea of lava",
        }
    }

    /// Single-character map glyph, shared by ASCII fixtures and RON maps.
    pub fn glyph(self) -> char {
        use TerrainKind::*;
        match self {
            Floor => '.',
            ShallowWater => '~',
            DeepWater => 'w',
            Lava => 'l',
            ToxicBog => 'b',
            RockWall => '#',
            ClearRockWall => 'c',
            StoneWall => 'X',
            PermaRock => 'P',
            Tree => 'T',
            Grate => 'G',
            Statue => 'S',
            ClosedDoor => '+',
            RunedDoor => 'R',
            SealedDoor => 'Z',
            OpenDoor => '\'',
            MalignGateway => 'M',
            OpenSea => 'O',
            LavaSea => 'L',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.glyph() == glyph)
    }

    pub const ALL: [TerrainKind; 19] = [
        TerrainKind::Floor,
        TerrainKind::ShallowWater,
        TerrainKind::DeepWater,
        TerrainKind::Lava,
        TerrainKind::ToxicBog,
        TerrainKind::RockWall,
        TerrainKind::ClearRockWall,
        TerrainKind::StoneWall,
        TerrainKind::PermaRock,
        TerrainKind::Tree,
        TerrainKind::Grate,
        TerrainKind::Statue,
        TerrainKind::ClosedDoor,
        TerrainKind::RunedDoor,
        TerrainKind::SealedDoor,
        TerrainKind::OpenDoor,
        TerrainKind::MalignGateway,
        TerrainKind::OpenSea,
        TerrainKind::LavaSea,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_round_trip() {
        for kind in TerrainKind::ALL {
            assert_eq!(TerrainKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(TerrainKind::from_glyph('?'), None);
    }

    #[test]
    fn walls_and_doors_are_solid() {
        assert!(TerrainKind::RockWall.is_solid());
        assert!(TerrainKind::ClosedDoor.is_solid());
        assert!(!TerrainKind::OpenDoor.is_solid());
        assert!(!TerrainKind::DeepWater.is_solid());
        assert!(!TerrainKind::DeepWater.is_traversable());
        assert!(TerrainKind::ShallowWater.is_traversable());
        assert!(TerrainKind::ToxicBog.is_traversable());
    }

    #[test]
    fn only_rock_is_diggable() {
        let diggable: Vec<_> = TerrainKind::ALL
            .into_iter()
            .filter(|kind| kind.is_diggable())
            .collect();
        assert_eq!(
            diggable,
            vec![TerrainKind::RockWall, TerrainKind::ClearRockWall]
        );
    }

    #[test]
    fn closed_doors_include_runed_and_sealed() {
        assert!(TerrainKind::RunedDoor.is_closed_door());
        assert!(TerrainKind::SealedDoor.is_closed_door());
        assert!(!TerrainKind::OpenDoor.is_closed_door());
        assert_eq!(TerrainKind::OpenDoor.door_state(), Some(DoorState::Open));
    }

    #[test]
    fn dimensions_contain_only_in_bounds() {
        let dims = MapDimensions::new(3, 2);
        assert!(dims.contains(Position::new(2, 1)));
        assert!(!dims.contains(Position::new(3, 1)));
        assert!(!dims.contains(Position::new(-1, 0)));
    }
}
