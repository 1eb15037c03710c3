use crate::stats::StatKind;

/// Progression changes announced by [`super::StatsManager`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatsEvent {
    /// Effective stats may differ from the last snapshot.
    StatsChanged,
    /// The active monkey moved to the next form. Consumers heal the player to full.
    Evolved { from: String, to: String },
    LevelUp { level: u32 },
}

/// Successful stat purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeReceipt {
    pub stat: StatKind,
    pub level: u32,
    pub cost: u64,
}

/// Successful evolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolutionReceipt {
    pub from: String,
    pub to: String,
    pub cost: u64,
}

/// Successful monkey level purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUpReceipt {
    pub level: u32,
    pub cost: u64,
}
