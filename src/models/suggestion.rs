use serde::{Deserialize, Serialize};

use super::size::{label_or_empty, Size};

/// Shown when a suggestion is requested without a feature description.
pub const EMPTY_DESCRIPTION_REASONING: &str =
    "Please enter a feature description to get an AI suggestion.";

/// What a size-suggestion provider returns for a feature description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionOutput {
    #[serde(rename = "suggestedTShirtSize")]
    pub suggested_size: Size,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// Suggestion result handed to callers.
///
/// Failures are carried as data: `size` is `None` and `reasoning` holds the
/// message to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeSuggestion {
    #[serde(with = "label_or_empty", default)]
    pub size: Option<Size>,
    pub hours: f64,
    pub reasoning: String,
}

impl SizeSuggestion {
    pub fn unavailable(reasoning: impl Into<String>) -> Self {
        Self {
            size: None,
            hours: 0.0,
            reasoning: reasoning.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.size.is_some()
    }
}

impl From<SuggestionOutput> for SizeSuggestion {
    fn from(output: SuggestionOutput) -> Self {
        Self {
            size: Some(output.suggested_size),
            hours: output.total_hours,
            reasoning: output.reasoning,
        }
    }
}

/// Input for requesting a suggestion over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub feature_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_serializes_empty_size() {
        let suggestion = SizeSuggestion::unavailable(EMPTY_DESCRIPTION_REASONING);
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["size"], "");
        assert_eq!(json["hours"], 0.0);
    }

    #[test]
    fn test_parses_provider_output() {
        let output: SuggestionOutput = serde_json::from_str(
            r#"{"suggestedTShirtSize":"L","reasoning":"Several screens","totalHours":120}"#,
        )
        .unwrap();
        assert_eq!(output.suggested_size, Size::L);
        assert_eq!(output.total_hours, 120.0);

        let suggestion = SizeSuggestion::from(output);
        assert_eq!(suggestion.size, Some(Size::L));
        assert!(suggestion.is_available());
    }

    #[test]
    fn test_provider_output_without_hours() {
        let output: SuggestionOutput =
            serde_json::from_str(r#"{"suggestedTShirtSize":"XS","reasoning":"Tiny"}"#).unwrap();
        assert_eq!(output.total_hours, 0.0);
    }

    #[test]
    fn test_rejects_unknown_provider_size() {
        let result: Result<SuggestionOutput, _> =
            serde_json::from_str(r#"{"suggestedTShirtSize":"XXL","reasoning":"Huge"}"#);
        assert!(result.is_err());
    }
}
