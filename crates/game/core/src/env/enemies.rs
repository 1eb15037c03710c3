//! Enemy definitions.

use crate::combat::CombatStats;
use crate::time::millis_from_secs;

/// Static stat block for one enemy type. Enemies never level up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub health: f32,
    pub damage: f32,
    /// Seconds between attacks.
    pub cooldown: f32,
    pub speed: f32,
    pub range: f32,
    /// Bananas credited to the player when this enemy dies.
    #[cfg_attr(feature = "serde", serde(default = "default_reward"))]
    pub reward: u64,
}

#[cfg(feature = "serde")]
fn default_reward() -> u64 {
    EnemyDefinition::DEFAULT_REWARD
}

impl EnemyDefinition {
    pub const DEFAULT_REWARD: u64 = 1;

    pub fn new(id: impl Into<String>, health: f32, damage: f32, cooldown: f32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            health,
            damage,
            cooldown,
            speed: 1.0,
            range: 2.0,
            reward: Self::DEFAULT_REWARD,
        }
    }

    pub fn with_movement(mut self, speed: f32, range: f32) -> Self {
        self.speed = speed;
        self.range = range;
        self
    }

    pub fn with_reward(mut self, reward: u64) -> Self {
        self.reward = reward;
        self
    }

    pub fn combat_stats(&self) -> CombatStats {
        CombatStats {
            max_health: self.health,
            damage: self.damage,
            cooldown_ms: millis_from_secs(self.cooldown),
            speed: self.speed,
            range: self.range,
        }
    }
}

/// Lookup of enemy definitions by id.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &str) -> Option<&EnemyDefinition>;

    fn enemy_ids(&self) -> Vec<String>;
}
