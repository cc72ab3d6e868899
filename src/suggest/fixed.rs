use super::{SizeSuggester, SuggestError};
use crate::models::{Size, SuggestionOutput};

/// Offline provider that answers every request with the same suggestion.
///
/// Used when no suggestion endpoint is configured, and in tests.
#[derive(Debug, Clone)]
pub struct FixedSuggester {
    size: Size,
    hours: f64,
    reasoning: String,
}

impl Default for FixedSuggester {
    fn default() -> Self {
        Self::new(
            Size::M,
            25.0,
            "Based on the feature name, it seems like a medium-sized task.",
        )
    }
}

impl FixedSuggester {
    pub fn new(size: Size, hours: f64, reasoning: impl Into<String>) -> Self {
        Self {
            size,
            hours,
            reasoning: reasoning.into(),
        }
    }
}

#[async_trait::async_trait]
impl SizeSuggester for FixedSuggester {
    async fn suggest(&self, description: &str) -> Result<SuggestionOutput, SuggestError> {
        if description.trim().is_empty() {
            return Err(SuggestError::EmptyDescription);
        }
        Ok(SuggestionOutput {
            suggested_size: self.size,
            total_hours: self.hours,
            reasoning: self.reasoning.clone(),
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_suggests_medium() {
        let output = FixedSuggester::default().suggest("Profile page").await.unwrap();
        assert_eq!(output.suggested_size, Size::M);
        assert_eq!(output.total_hours, 25.0);
    }

    #[tokio::test]
    async fn test_rejects_blank_description() {
        let result = FixedSuggester::default().suggest("   ").await;
        assert!(matches!(result, Err(SuggestError::EmptyDescription)));
    }
}
