//! Level and wave layouts.

use crate::config::GameConfig;
use crate::time::millis_from_secs;

/// One enemy type repeated `count` times.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    /// Enemy definition id.
    pub enemy: String,
    pub count: u32,
    /// Seconds to wait after each spawn of this entry.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay: f32,
}

impl SpawnEntry {
    pub fn new(enemy: impl Into<String>, count: u32, delay: f32) -> Self {
        Self {
            enemy: enemy.into(),
            count,
            delay,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        millis_from_secs(self.delay)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveDefinition {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub spawns: Vec<SpawnEntry>,
    /// How far behind the player enemies of this wave appear.
    #[cfg_attr(feature = "serde", serde(default = "default_spawn_distance"))]
    pub spawn_distance: f32,
}

#[cfg(feature = "serde")]
fn default_spawn_distance() -> f32 {
    GameConfig::DEFAULT_SPAWN_DISTANCE
}

impl WaveDefinition {
    pub fn new(spawns: Vec<SpawnEntry>) -> Self {
        Self {
            name: String::new(),
            spawns,
            spawn_distance: GameConfig::DEFAULT_SPAWN_DISTANCE,
        }
    }

    pub fn enemy_count(&self) -> u32 {
        self.spawns.iter().map(|entry| entry.count).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub waves: Vec<WaveDefinition>,
    /// Level offered after this one completes. Never loaded automatically.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next_level: Option<String>,
}

impl LevelDefinition {
    pub fn new(id: impl Into<String>, waves: Vec<WaveDefinition>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            waves,
            next_level: None,
        }
    }

    pub fn with_next_level(mut self, next: impl Into<String>) -> Self {
        self.next_level = Some(next.into());
        self
    }

    pub fn total_enemies(&self) -> u32 {
        self.waves.iter().map(WaveDefinition::enemy_count).sum()
    }
}

/// Lookup of levels by id, in play order.
pub trait LevelOracle: Send + Sync {
    fn level(&self, id: &str) -> Option<&LevelDefinition>;

    fn level_ids(&self) -> Vec<String>;

    fn first_level(&self) -> Option<&LevelDefinition>;
}
