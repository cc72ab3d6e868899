//! Size-suggestion providers.
//!
//! A provider takes a free-text feature description and proposes a T-shirt
//! size with reasoning. Estimation sessions only talk to the [`SizeSuggester`]
//! trait; failures are turned into displayable results by the session.

mod fixed;
mod http;
mod prompt;

pub use fixed::FixedSuggester;
pub use http::HttpSuggester;
pub use prompt::build_prompt;

use thiserror::Error;

use crate::models::SuggestionOutput;

/// Errors from size-suggestion providers.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("Suggestion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Suggestion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid suggestion response: {0}")]
    InvalidResponse(String),

    #[error("Feature description is empty")]
    EmptyDescription,
}

/// Common trait for size-suggestion providers.
#[async_trait::async_trait]
pub trait SizeSuggester: Send + Sync {
    /// Propose a size for a non-empty feature description.
    async fn suggest(&self, description: &str) -> Result<SuggestionOutput, SuggestError>;

    /// Provider name for logs (e.g., "http", "fixed").
    fn name(&self) -> &str;
}
