//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into game-core types; [`ContentFactory`]
//! reads a whole data directory at once.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod forms;
pub mod levels;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentFactory, GameContent};
pub use forms::FormLoader;
pub use levels::LevelLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
