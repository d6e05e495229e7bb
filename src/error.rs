use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// A confirmation prompt was declined. Already completed steps stay in place.
    #[error("Aborted.")]
    Aborted,

    #[error("The repository has no tags that are SemVer compliant, you must specify a tag name with the --tag option.")]
    NoCompliantTags,

    #[error("Tagging strategy '{strategy}' must return a non-empty tag name")]
    InvalidStrategyResult { strategy: String },

    #[error("Must have a branch checked out to commit to")]
    NoBranchCheckedOut,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid TOML in config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Invalid JSON in manifest '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Hook error: {0}")]
    Hook(String),

    #[error("Strategy error: {0}")]
    Strategy(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        ReleaseError::Hook(msg.into())
    }

    /// Create a strategy error with context
    pub fn strategy(msg: impl Into<String>) -> Self {
        ReleaseError::Strategy(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }

    /// Create an invalid strategy result error for the named strategy
    pub fn invalid_strategy_result(strategy: impl Into<String>) -> Self {
        ReleaseError::InvalidStrategyResult {
            strategy: strategy.into(),
        }
    }

    /// Whether this error is the user declining a confirmation prompt
    pub fn is_aborted(&self) -> bool {
        matches!(self, ReleaseError::Aborted)
    }
}
