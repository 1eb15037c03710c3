//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::{Catalog, EnemyDefinition, FormChain, GameConfig, LevelDefinition};

use crate::loaders::{ConfigLoader, EnemyLoader, FormLoader, LevelLoader, LoadResult};

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub catalog: Catalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional)
/// ├── forms.ron
/// ├── enemies.ron
/// └── levels.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the evolution chain from `forms.ron`.
    pub fn load_forms(&self) -> LoadResult<FormChain> {
        let path = self.data_dir.join("forms.ron");
        FormLoader::load(&path)
    }

    /// Load enemy definitions from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyDefinition>> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Load level layouts from `levels.ron`.
    pub fn load_levels(&self) -> LoadResult<Vec<LevelDefinition>> {
        let path = self.data_dir.join("levels.ron");
        LevelLoader::load(&path)
    }

    /// Load every file and assemble the catalog.
    pub fn load_all(&self) -> LoadResult<GameContent> {
        if !self.data_dir.exists() {
            anyhow::bail!(
                "Content data directory not found: {}",
                self.data_dir.display()
            );
        }

        let config = self.load_config()?;
        let chain = self.load_forms()?;
        if chain.get(&config.starting_form).is_none() {
            anyhow::bail!(
                "Starting form '{}' is not part of the evolution chain",
                config.starting_form
            );
        }
        let enemies = self.load_enemies()?;
        let levels = self.load_levels()?;

        Ok(GameContent {
            config,
            catalog: Catalog::new(enemies, chain, levels),
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
