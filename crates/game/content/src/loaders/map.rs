//! Map data loader.
//!
//! Loads static terrain from map RON files. Monsters and the player are
//! placed separately by whoever builds the `GameState`.

use std::path::Path;

use move_core::env::{GridMap, TerrainKind};
use move_core::{MapOracle, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
///
/// `rows` uses the single-character terrain glyphs; `tiles` overrides
/// individual cells afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    rows: Vec<String>,
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
}

/// Loader for [`GridMap`] from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let content = read_file(path)?;
        let map = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            width = map.dimensions().width,
            height = map.dimensions().height,
            "loaded map"
        );
        Ok(map)
    }

    pub fn parse(content: &str) -> LoadResult<GridMap> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let mut map = GridMap::from_rows(&data.rows)
            .map_err(|e| anyhow::anyhow!("Invalid map layout: {}", e))?;

        for (x, y, terrain) in data.tiles {
            let position = Position::new(x, y);
            if !map.set(position, terrain) {
                anyhow::bail!("Tile override {} is outside the map", position);
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rows_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
    rows: [
        "XXXXX",
        "X...X",
        "XXXXX",
    ],
    tiles: [(2, 1, Lava)],
)"#
        )
        .unwrap();

        let map = MapLoader::load(file.path()).unwrap();
        assert_eq!(map.dimensions().width, 5);
        assert_eq!(map.dimensions().height, 3);
        assert_eq!(map.terrain(Position::new(1, 1)), Some(TerrainKind::Floor));
        assert_eq!(map.terrain(Position::new(2, 1)), Some(TerrainKind::Lava));
        assert_eq!(map.terrain(Position::new(0, 0)), Some(TerrainKind::StoneWall));
    }

    #[test]
    fn override_outside_map_is_an_error() {
        let error = MapLoader::parse(r#"(rows: ["..."], tiles: [(5, 0, Lava)])"#).unwrap_err();
        assert!(error.to_string().contains("outside the map"));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let error = MapLoader::parse(r#"(rows: ["...", ".."])"#).unwrap_err();
        assert!(error.to_string().contains("Invalid map layout"));
    }
}
