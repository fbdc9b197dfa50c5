//! Movement configuration loader.

use std::path::Path;

use move_core::MoveConfig;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`MoveConfig`] from TOML files.
///
/// Missing keys keep their defaults, so a file only lists what it changes:
///
/// ```toml
/// barbs_snap_chance = 4
/// easy_door = false
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<MoveConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded move config");
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<MoveConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "barbs_snap_chance = 4\neasy_door = false").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.barbs_snap_chance, 4);
        assert!(!config.easy_door);
        assert_eq!(config.base_delay, MoveConfig::default().base_delay);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), MoveConfig::default());
    }

    #[test]
    fn malformed_values_are_rejected() {
        let error = ConfigLoader::parse("dig_noise = \"loud\"").unwrap_err();
        assert!(error.to_string().contains("Failed to parse config TOML"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let error = ConfigLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("missing.toml"));
    }
}
