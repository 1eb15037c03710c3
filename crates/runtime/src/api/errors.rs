//! Unified error types surfaced by the runtime API.
//!
//! Wraps refused transactions, unknown content and repository failures so
//! clients can bubble them up with consistent context.
use game_core::{ErrorSeverity, GameError, OracleError, UpgradeError};
use thiserror::Error;

pub use crate::repository::RepositoryError;
use crate::runtime::SessionPhase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Upgrade(#[from] UpgradeError),

    #[error(transparent)]
    Content(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires game content to be configured before building")]
    MissingContent,

    #[error("content defines no levels")]
    NoLevels,

    #[error("no level follows the current one")]
    NoNextLevel,

    #[error("{command} is not allowed while the session is {phase}")]
    InvalidPhase {
        command: &'static str,
        phase: SessionPhase,
    },
}

impl RuntimeError {
    /// Severity of the wrapped failure; runtime-level misuse counts as validation.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Upgrade(error) => error.severity(),
            Self::Content(error) => error.severity(),
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::MissingContent | Self::NoLevels => ErrorSeverity::Fatal,
            Self::NoNextLevel | Self::InvalidPhase { .. } => ErrorSeverity::Validation,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Upgrade(error) => error.error_code(),
            Self::Content(error) => error.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::NoLevels => "RUNTIME_NO_LEVELS",
            Self::NoNextLevel => "RUNTIME_NO_NEXT_LEVEL",
            Self::InvalidPhase { .. } => "RUNTIME_INVALID_PHASE",
        }
    }
}
