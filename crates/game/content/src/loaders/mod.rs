//! Content loaders for reading movement data from files.

pub mod config;
pub mod map;

pub use config::ConfigLoader;
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use move_core::{ErrorContext, ExecuteError, Position};

    #[test]
    fn execute_errors_round_trip_without_context() {
        let error = ExecuteError::player_out_of_bounds(Position::new(40, 2), 9);

        let text = ron::to_string(&error).unwrap();
        let restored: ExecuteError = ron::from_str(&text).unwrap();

        assert_eq!(
            restored,
            ExecuteError::PlayerOutOfBounds {
                position: Position::new(40, 2),
                context: ErrorContext::default(),
            }
        );
    }
}
