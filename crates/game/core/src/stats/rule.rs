//! Value and cost curves for a single upgradeable stat.

/// Growth curve for one stat of one form.
///
/// ```text
/// value_at(L) = (base_value + add_per_level * L) * mult_per_level^L
/// cost_at(L)  = round(base_cost * cost_growth^L)
/// ```
///
/// `cost_at(L)` is the price of moving from level `L` to `L + 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRule {
    pub base_value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub add_per_level: f32,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub mult_per_level: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_cost: u64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub cost_growth: f32,
}

#[cfg(feature = "serde")]
fn one() -> f32 {
    1.0
}

impl StatRule {
    pub const fn new(
        base_value: f32,
        add_per_level: f32,
        mult_per_level: f32,
        base_cost: u64,
        cost_growth: f32,
    ) -> Self {
        Self {
            base_value,
            add_per_level,
            mult_per_level,
            base_cost,
            cost_growth,
        }
    }

    /// A rule that never changes and costs nothing.
    pub const fn flat(value: f32) -> Self {
        Self::new(value, 0.0, 1.0, 0, 1.0)
    }

    pub fn value_at(&self, level: u32) -> f32 {
        let level = level as f32;
        let additive = self.base_value + self.add_per_level * level;
        if self.mult_per_level != 1.0 {
            additive * self.mult_per_level.powf(level)
        } else {
            additive
        }
    }

    pub fn cost_at(&self, level: u32) -> u64 {
        scaled_cost(self.base_cost, f64::from(self.cost_growth), level)
    }
}

/// `round(base * growth^exponent)`, rounding half to even and floored at zero.
///
/// Shared by stat upgrades, monkey level-ups and evolutions.
pub fn scaled_cost(base: u64, growth: f64, exponent: u32) -> u64 {
    let raw = base as f64 * growth.powf(f64::from(exponent));
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        raw.round_ties_even() as u64
    }
}
