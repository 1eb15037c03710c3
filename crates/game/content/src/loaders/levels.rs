//! Level layout loader.

use std::path::Path;

use game_core::LevelDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level list structure for RON files, in play order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelDefinition>,
}

/// Loader for level and wave layouts from RON files.
///
/// Enemy references are not checked here: a wave entry naming an unknown
/// enemy is skipped when it comes up during play.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<LevelDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<LevelDefinition>> {
        let catalog: LevelCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level catalog RON: {}", e))?;

        for (index, level) in catalog.levels.iter().enumerate() {
            if catalog.levels[..index].iter().any(|l| l.id == level.id) {
                anyhow::bail!("Duplicate level id '{}'", level.id);
            }
        }

        Ok(catalog.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waves_default_spawn_distance() {
        let levels = LevelLoader::parse(
            r#"(levels: [
                (
                    id: "jungle_1",
                    waves: [
                        (spawns: [(enemy: "bananemy", count: 3, delay: 1.0)]),
                        (spawns: [(enemy: "bananemy", count: 2)], spawn_distance: 20.0),
                    ],
                    next_level: Some("jungle_2"),
                ),
            ])"#,
        )
        .unwrap();

        let level = &levels[0];
        assert_eq!(level.waves[0].spawn_distance, 15.0);
        assert_eq!(level.waves[1].spawn_distance, 20.0);
        assert_eq!(level.waves[1].spawns[0].delay, 0.0);
        assert_eq!(level.total_enemies(), 5);
        assert_eq!(level.next_level.as_deref(), Some("jungle_2"));
    }

    #[test]
    fn duplicate_level_ids_are_rejected() {
        let err = LevelLoader::parse(r#"(levels: [(id: "x", waves: []), (id: "x", waves: [])])"#)
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate level id 'x'"));
    }
}
