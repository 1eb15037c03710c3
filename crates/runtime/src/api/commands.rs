use std::fmt;

use game_core::{EvolutionReceipt, LevelUpReceipt, StatKind, UpgradeReceipt};

use crate::runtime::SessionPhase;

/// Input entering the session from a UI, a script or the autopilot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Upgrade(StatKind),
    /// The damage-per-second button; buys attack cadence.
    UpgradeDps,
    Evolve,
    LevelUp,
    /// Loads a level. From `Results` this is a retry with a fresh player.
    StartLevel(String),
    StartNextLevel,
    /// Debug cheat: credit bananas.
    GrantBananas(u64),
    /// Debug cheat: empty the wallet.
    ResetWallet,
    /// Wipes the wallet and progression and returns to `Start`.
    NewSession,
    Pause,
    Resume,
}

impl Command {
    /// Stable name used in logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upgrade(_) => "upgrade",
            Self::UpgradeDps => "upgrade_dps",
            Self::Evolve => "evolve",
            Self::LevelUp => "level_up",
            Self::StartLevel(_) => "start_level",
            Self::StartNextLevel => "start_next_level",
            Self::GrantBananas(_) => "grant_bananas",
            Self::ResetWallet => "reset_wallet",
            Self::NewSession => "new_session",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade(stat) => write!(f, "upgrade {}", stat),
            Self::StartLevel(level) => write!(f, "start_level {}", level),
            Self::GrantBananas(amount) => write!(f, "grant_bananas {}", amount),
            other => f.write_str(other.name()),
        }
    }
}

/// What a successful command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Upgraded(UpgradeReceipt),
    Evolved(EvolutionReceipt),
    LeveledUp(LevelUpReceipt),
    LevelStarted { level: String },
    BalanceSet { balance: u64 },
    SessionReset,
    PhaseChanged { from: SessionPhase, to: SessionPhase },
}
