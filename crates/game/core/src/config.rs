use crate::stats::StatTable;

/// Economy constants and tunable defaults.
///
/// Content files may override any field; missing keys keep the values below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Form every new monkey starts in.
    pub starting_form: String,
    /// Monkey id the player controls.
    pub active_monkey: String,

    pub base_level_up_cost: u64,
    pub level_up_cost_multiplier: f64,
    pub base_evolution_cost: u64,
    pub evolution_cost_multiplier: f64,

    /// Upgrade caps used when a form does not declare its own.
    pub max_levels: StatTable<u32>,
    /// Stat values reported while the active form is unknown.
    pub fallback_values: StatTable<f32>,
    /// Upgrade prices reported while the active form is unknown.
    pub fallback_costs: StatTable<u64>,

    /// Where the player is placed when spawned.
    pub player_spawn_x: f32,
    /// Distance behind the player at which waves spawn, unless a wave overrides it.
    pub default_spawn_distance: f32,
}

impl GameConfig {
    pub const DEFAULT_STARTING_FORM: &'static str = "monkee_1";
    pub const DEFAULT_ACTIVE_MONKEY: &'static str = "starter";

    pub const DEFAULT_BASE_LEVEL_UP_COST: u64 = 20;
    pub const DEFAULT_LEVEL_UP_COST_MULTIPLIER: f64 = 1.25;
    pub const DEFAULT_BASE_EVOLUTION_COST: u64 = 300;
    pub const DEFAULT_EVOLUTION_COST_MULTIPLIER: f64 = 1.5;

    pub const DEFAULT_MAX_LEVELS: StatTable<u32> = StatTable::new(12, 12, 10, 12, 10);
    pub const DEFAULT_FALLBACK_VALUES: StatTable<f32> = StatTable::new(100.0, 5.0, 1.0, 5.0, 2.0);
    pub const DEFAULT_FALLBACK_COSTS: StatTable<u64> = StatTable::new(30, 35, 40, 30, 35);

    pub const DEFAULT_SPAWN_DISTANCE: f32 = 15.0;

    pub fn new() -> Self {
        Self {
            starting_form: Self::DEFAULT_STARTING_FORM.to_owned(),
            active_monkey: Self::DEFAULT_ACTIVE_MONKEY.to_owned(),
            base_level_up_cost: Self::DEFAULT_BASE_LEVEL_UP_COST,
            level_up_cost_multiplier: Self::DEFAULT_LEVEL_UP_COST_MULTIPLIER,
            base_evolution_cost: Self::DEFAULT_BASE_EVOLUTION_COST,
            evolution_cost_multiplier: Self::DEFAULT_EVOLUTION_COST_MULTIPLIER,
            max_levels: Self::DEFAULT_MAX_LEVELS,
            fallback_values: Self::DEFAULT_FALLBACK_VALUES,
            fallback_costs: Self::DEFAULT_FALLBACK_COSTS,
            player_spawn_x: 0.0,
            default_spawn_distance: Self::DEFAULT_SPAWN_DISTANCE,
        }
    }

    pub fn with_starting_form(mut self, form: impl Into<String>) -> Self {
        self.starting_form = form.into();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
