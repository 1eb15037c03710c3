//! Monkey forms and the evolution chain.

use super::OracleError;
use crate::stats::{StatKind, StatRule, StatTable};

/// One entry of the evolution chain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonkeyForm {
    pub id: String,
    pub name: String,
    pub rules: StatTable<StatRule>,
    /// Applied on top of each rule's output.
    #[cfg_attr(feature = "serde", serde(default = "unit_multipliers"))]
    pub multipliers: StatTable<f32>,
    /// Per-form upgrade caps; the config defaults apply when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_levels: Option<StatTable<u32>>,
}

#[cfg(feature = "serde")]
fn unit_multipliers() -> StatTable<f32> {
    StatTable::splat(1.0)
}

impl MonkeyForm {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rules: StatTable<StatRule>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rules,
            multipliers: StatTable::splat(1.0),
            max_levels: None,
        }
    }

    pub fn with_multipliers(mut self, multipliers: StatTable<f32>) -> Self {
        self.multipliers = multipliers;
        self
    }

    pub fn with_max_levels(mut self, max_levels: StatTable<u32>) -> Self {
        self.max_levels = Some(max_levels);
        self
    }

    pub fn rule(&self, stat: StatKind) -> &StatRule {
        self.rules.get(stat)
    }

    pub fn multiplier(&self, stat: StatKind) -> f32 {
        *self.multipliers.get(stat)
    }

    /// Effective value of `stat` at upgrade `level`.
    pub fn value_at(&self, stat: StatKind, level: u32) -> f32 {
        self.rule(stat).value_at(level) * self.multiplier(stat)
    }
}

/// Ordered evolution chain, weakest form first.
///
/// Construction rejects empty chains and duplicate ids, so every lookup by
/// index between `0` and `len() - 1` is valid.
#[derive(Clone, Debug, PartialEq)]
pub struct FormChain {
    forms: Vec<MonkeyForm>,
}

impl FormChain {
    pub fn new(forms: Vec<MonkeyForm>) -> Result<Self, OracleError> {
        if forms.is_empty() {
            return Err(OracleError::EmptyChain);
        }
        for (index, form) in forms.iter().enumerate() {
            if forms[..index].iter().any(|earlier| earlier.id == form.id) {
                return Err(OracleError::DuplicateForm(form.id.clone()));
            }
        }
        Ok(Self { forms })
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn first(&self) -> &MonkeyForm {
        &self.forms[0]
    }

    pub fn get(&self, id: &str) -> Option<&MonkeyForm> {
        self.forms.iter().find(|form| form.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&MonkeyForm> {
        self.forms.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.forms.iter().position(|form| form.id == id)
    }

    /// Form after `id`, or `None` at the end of the chain or for an unknown id.
    pub fn next(&self, id: &str) -> Option<&MonkeyForm> {
        self.index_of(id).and_then(|index| self.forms.get(index + 1))
    }

    pub fn is_final(&self, id: &str) -> bool {
        self.index_of(id) == Some(self.forms.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonkeyForm> {
        self.forms.iter()
    }
}

/// Access to the evolution chain.
pub trait FormOracle: Send + Sync {
    fn chain(&self) -> &FormChain;

    fn form(&self, id: &str) -> Option<&MonkeyForm> {
        self.chain().get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: &str) -> MonkeyForm {
        MonkeyForm::new(id, id.to_uppercase(), StatTable::splat(StatRule::flat(1.0)))
    }

    #[test]
    fn chain_walks_forward() {
        let chain = FormChain::new(vec![form("a"), form("b"), form("c")]).unwrap();

        assert_eq!(chain.index_of("b"), Some(1));
        assert_eq!(chain.next("a").map(|f| f.id.as_str()), Some("b"));
        assert!(chain.next("c").is_none());
        assert!(chain.next("zzz").is_none());
        assert!(chain.is_final("c"));
        assert!(!chain.is_final("zzz"));
    }

    #[test]
    fn chain_rejects_bad_shapes() {
        assert_eq!(FormChain::new(Vec::new()), Err(OracleError::EmptyChain));
        assert_eq!(
            FormChain::new(vec![form("a"), form("a")]),
            Err(OracleError::DuplicateForm("a".into()))
        );
    }

    #[test]
    fn multipliers_scale_rule_output() {
        let rules = StatTable::splat(StatRule::new(10.0, 2.0, 1.0, 10, 1.1));
        let form = MonkeyForm::new("m", "M", rules)
            .with_multipliers(StatTable::new(1.0, 1.5, 1.0, 1.0, 1.0));

        assert_eq!(form.value_at(StatKind::Damage, 2), 21.0);
        assert_eq!(form.value_at(StatKind::Health, 2), 14.0);
    }
}
