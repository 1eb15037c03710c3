//! Traits describing read-only game content.
//!
//! Oracles expose enemy definitions, the monkey evolution chain, and level
//! layouts. [`GameEnv`] bundles the ones the engine reads during a step so it
//! never depends on a concrete content source.
mod catalog;
mod enemies;
mod error;
mod forms;
mod levels;

pub use catalog::Catalog;
pub use enemies::{EnemyDefinition, EnemyOracle};
pub use error::OracleError;
pub use forms::{FormChain, FormOracle, MonkeyForm};
pub use levels::{LevelDefinition, LevelOracle, SpawnEntry, WaveDefinition};

/// Read-only oracles required by [`crate::engine::GameEngine::step`].
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    enemies: &'a dyn EnemyOracle,
    levels: &'a dyn LevelOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(enemies: &'a dyn EnemyOracle, levels: &'a dyn LevelOracle) -> Self {
        Self { enemies, levels }
    }

    pub fn enemies(&self) -> &'a dyn EnemyOracle {
        self.enemies
    }

    pub fn levels(&self) -> &'a dyn LevelOracle {
        self.levels
    }

    /// Looks up an enemy definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownEnemy` if no definition has this id.
    pub fn enemy(&self, id: &str) -> Result<&'a EnemyDefinition, OracleError> {
        self.enemies
            .enemy(id)
            .ok_or_else(|| OracleError::UnknownEnemy(id.to_owned()))
    }

    /// Looks up a level.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownLevel` if no level has this id.
    pub fn level(&self, id: &str) -> Result<&'a LevelDefinition, OracleError> {
        self.levels
            .level(id)
            .ok_or_else(|| OracleError::UnknownLevel(id.to_owned()))
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("enemies", &self.enemies.enemy_ids())
            .field("levels", &self.levels.level_ids())
            .finish()
    }
}
