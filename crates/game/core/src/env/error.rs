//! Definition lookup errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while resolving or validating content definitions.
///
/// A lookup miss during play is reported and skipped rather than aborting the
/// tick; structural problems (an empty or duplicated chain) reject the data
/// set when it is assembled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("enemy definition '{0}' not found")]
    UnknownEnemy(String),

    #[error("monkey form '{0}' not found")]
    UnknownForm(String),

    #[error("level '{0}' not found")]
    UnknownLevel(String),

    #[error("evolution chain is empty")]
    EmptyChain,

    #[error("monkey form '{0}' appears more than once in the evolution chain")]
    DuplicateForm(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            UnknownEnemy(_) | UnknownForm(_) | UnknownLevel(_) => ErrorSeverity::Validation,
            EmptyChain | DuplicateForm(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            UnknownEnemy(_) => "ORACLE_UNKNOWN_ENEMY",
            UnknownForm(_) => "ORACLE_UNKNOWN_FORM",
            UnknownLevel(_) => "ORACLE_UNKNOWN_LEVEL",
            EmptyChain => "ORACLE_EMPTY_CHAIN",
            DuplicateForm(_) => "ORACLE_DUPLICATE_FORM",
        }
    }
}
