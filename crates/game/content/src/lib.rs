//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game content and the loaders for its RON/TOML files:
//! - Monkey forms and the evolution chain (`forms.ron`)
//! - Enemy definitions (`enemies.ron`)
//! - Level and wave layouts (`levels.ron`)
//! - Economy configuration (`config.toml`)
//!
//! Content is consumed through the game-core oracle traits and never appears in saves.
//! The default data set lives in this crate's `data/` directory; see [`default_data_dir`].

use std::path::PathBuf;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, FormLoader, GameContent, LevelLoader, LoadResult,
};

/// The data directory shipped with this crate.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
