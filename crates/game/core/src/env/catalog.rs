use std::collections::HashMap;

use super::{
    EnemyDefinition, EnemyOracle, FormChain, FormOracle, GameEnv, LevelDefinition, LevelOracle,
};

/// In-memory content set implementing every oracle.
#[derive(Clone, Debug)]
pub struct Catalog {
    enemies: HashMap<String, EnemyDefinition>,
    chain: FormChain,
    levels: Vec<LevelDefinition>,
}

impl Catalog {
    pub fn new(
        enemies: Vec<EnemyDefinition>,
        chain: FormChain,
        levels: Vec<LevelDefinition>,
    ) -> Self {
        let enemies = enemies
            .into_iter()
            .map(|enemy| (enemy.id.clone(), enemy))
            .collect();
        Self {
            enemies,
            chain,
            levels,
        }
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(self, self)
    }
}

impl EnemyOracle for Catalog {
    fn enemy(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    fn enemy_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.enemies.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl FormOracle for Catalog {
    fn chain(&self) -> &FormChain {
        &self.chain
    }
}

impl LevelOracle for Catalog {
    fn level(&self, id: &str) -> Option<&LevelDefinition> {
        self.levels.iter().find(|level| level.id == id)
    }

    fn level_ids(&self) -> Vec<String> {
        self.levels.iter().map(|level| level.id.clone()).collect()
    }

    fn first_level(&self) -> Option<&LevelDefinition> {
        self.levels.first()
    }
}
