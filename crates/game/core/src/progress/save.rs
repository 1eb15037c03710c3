use super::MonkeyProgress;

/// Every monkey's progression within one save slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSave {
    pub active_monkey: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monkeys: Vec<MonkeyProgress>,
}

impl ProgressSave {
    pub fn new(active_monkey: impl Into<String>) -> Self {
        Self {
            active_monkey: active_monkey.into(),
            monkeys: Vec::new(),
        }
    }

    pub fn get(&self, monkey_id: &str) -> Option<&MonkeyProgress> {
        self.monkeys.iter().find(|m| m.monkey_id == monkey_id)
    }

    /// Index of `monkey_id`, creating a fresh entry in `starting_form` on first access.
    pub fn index_or_create(&mut self, monkey_id: &str, starting_form: &str) -> usize {
        if let Some(index) = self.monkeys.iter().position(|m| m.monkey_id == monkey_id) {
            return index;
        }
        self.monkeys.push(MonkeyProgress::new(monkey_id, starting_form));
        self.monkeys.len() - 1
    }

    pub fn get_or_create(&mut self, monkey_id: &str, starting_form: &str) -> &mut MonkeyProgress {
        let index = self.index_or_create(monkey_id, starting_form);
        &mut self.monkeys[index]
    }

    pub fn active(&self) -> Option<&MonkeyProgress> {
        self.get(&self.active_monkey)
    }
}
