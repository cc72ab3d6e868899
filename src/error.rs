//! Error types for estimation operations.

use thiserror::Error;
use uuid::Uuid;

/// Result alias for estimation operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Errors surfaced by the cost model, the feature ledger and sessions.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// A cost model value was rejected (negative base hours, non-positive multiplier, NaN).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A feature field was rejected (empty name, non-positive quantity multiplier).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(Uuid),

    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// `save` was called before the session was attached to a stored project.
    #[error("Project has no id yet; register it with the store before saving")]
    NoProjectId,

    #[error("Duplicate feature id in ledger: {0}")]
    DuplicateFeature(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl EstimateError {
    /// Whether the error is caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::InvalidInput(_) | Self::NoProjectId
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FeatureNotFound(_) | Self::ProjectNotFound(_))
    }
}
