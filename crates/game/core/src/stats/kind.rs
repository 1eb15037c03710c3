/// The five stats a monkey can upgrade.
///
/// Damage per second is deliberately absent: it is always derived from
/// [`StatKind::Damage`] and [`StatKind::AttacksPerSecond`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    /// Maximum health.
    Health,
    /// Damage dealt per attack.
    Damage,
    /// Attack cadence; the attack cooldown is its reciprocal.
    #[strum(to_string = "attacks_per_second", serialize = "aps")]
    AttacksPerSecond,
    /// Walking speed in world units per second.
    MoveSpeed,
    /// Distance at which an opponent is detected and attacked.
    Range,
}

impl StatKind {
    /// All stats in display order.
    pub const ALL: [StatKind; 5] = [
        StatKind::Health,
        StatKind::Damage,
        StatKind::AttacksPerSecond,
        StatKind::MoveSpeed,
        StatKind::Range,
    ];
}
