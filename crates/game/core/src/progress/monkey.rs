use crate::stats::{StatKind, StatTable};

/// Upgrade state of one monkey.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonkeyProgress {
    pub monkey_id: String,
    /// Active entry of the evolution chain.
    pub current_form: String,
    /// Prestige counter, starts at 1. Tracked and purchasable but not read by any stat formula.
    pub monkey_level: u32,
    /// Upgrade level per stat for the current form.
    pub levels: StatTable<u32>,
}

impl MonkeyProgress {
    pub fn new(monkey_id: impl Into<String>, starting_form: impl Into<String>) -> Self {
        Self {
            monkey_id: monkey_id.into(),
            current_form: starting_form.into(),
            monkey_level: 1,
            levels: StatTable::default(),
        }
    }

    pub fn level(&self, stat: StatKind) -> u32 {
        *self.levels.get(stat)
    }

    pub(crate) fn increment(&mut self, stat: StatKind) -> u32 {
        let level = self.levels.get_mut(stat);
        *level += 1;
        *level
    }

    /// Zeroes every upgrade counter.
    pub fn reset_upgrades(&mut self) {
        self.levels = StatTable::default();
    }

    /// Moves to `form` with fresh upgrade counters.
    pub(crate) fn evolve_to(&mut self, form: impl Into<String>) {
        self.current_form = form.into();
        self.reset_upgrades();
    }
}
