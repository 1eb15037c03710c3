use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatKind;

/// Why a stat upgrade, level-up or evolution was refused.
///
/// A refusal never mutates the wallet or the progression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    #[error("{stat} is already at max level {max}")]
    MaxLevel { stat: StatKind, max: u32 },

    #[error("insufficient bananas: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("'{form}' is the final form")]
    FinalForm { form: String },

    #[error("current form '{form}' is not in the evolution chain")]
    UnknownForm { form: String },
}

impl GameError for UpgradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. } => ErrorSeverity::Recoverable,
            Self::MaxLevel { .. } | Self::FinalForm { .. } => ErrorSeverity::Validation,
            Self::UnknownForm { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MaxLevel { .. } => "UPGRADE_MAX_LEVEL",
            Self::InsufficientFunds { .. } => "UPGRADE_INSUFFICIENT_FUNDS",
            Self::FinalForm { .. } => "UPGRADE_FINAL_FORM",
            Self::UnknownForm { .. } => "UPGRADE_UNKNOWN_FORM",
        }
    }
}
