//! Dense in-memory [`MapOracle`] backed by a row-major terrain grid.

use crate::state::Position;

use super::{MapDimensions, MapOracle, StaticTile, TerrainKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown terrain glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl GridMap {
    /// Creates a map filled with a single terrain.
    pub fn filled(width: u32, height: u32, terrain: TerrainKind) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            tiles: vec![terrain; (width as usize) * (height as usize)],
        }
    }

    /// Parses one string per row using [`TerrainKind::glyph`] characters.
    /// Row 0 is `y = 0`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain =
                    TerrainKind::from_glyph(glyph).ok_or(GridError::UnknownGlyph { glyph, x, y })?;
                tiles.push(terrain);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            tiles,
        })
    }

    pub fn set(&mut self, position: Position, terrain: TerrainKind) -> bool {
        match self.index(position) {
            Some(index) => {
                self.tiles[index] = terrain;
                true
            }
            None => false,
        }
    }

    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        self.index(position).map(|index| self.tiles[index])
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.terrain(position).map(StaticTile::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_top_down() {
        let map = GridMap::from_rows(&["#.+", "~wl"]).expect("valid map");
        assert_eq!(map.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(map.terrain(Position::new(0, 0)), Some(TerrainKind::RockWall));
        assert_eq!(map.terrain(Position::new(2, 0)), Some(TerrainKind::ClosedDoor));
        assert_eq!(map.terrain(Position::new(1, 1)), Some(TerrainKind::DeepWater));
        assert_eq!(map.terrain(Position::new(3, 0)), None);
    }

    #[test]
    fn rejects_ragged_and_unknown_rows() {
        assert_eq!(
            GridMap::from_rows(&["...", ".."]),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            GridMap::from_rows(&[".?."]),
            Err(GridError::UnknownGlyph { glyph: '?', x: 1, y: 0 })
        ));
        assert_eq!(GridMap::from_rows::<&str>(&[]), Err(GridError::Empty));
    }

    #[test]
    fn set_ignores_out_of_bounds() {
        let mut map = GridMap::filled(2, 2, TerrainKind::Floor);
        assert!(map.set(Position::new(1, 1), TerrainKind::Lava));
        assert!(!map.set(Position::new(5, 5), TerrainKind::Lava));
        assert_eq!(map.terrain(Position::new(1, 1)), Some(TerrainKind::Lava));
    }
}
