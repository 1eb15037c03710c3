//! Enemy catalog loader.

use std::path::Path;

use game_core::EnemyDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyDefinition>,
}

/// Loader for enemy definitions from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyDefinition>> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        for (index, enemy) in catalog.enemies.iter().enumerate() {
            if catalog.enemies[..index].iter().any(|e| e.id == enemy.id) {
                anyhow::bail!("Duplicate enemy id '{}'", enemy.id);
            }
        }

        Ok(catalog.enemies)
    }
}
