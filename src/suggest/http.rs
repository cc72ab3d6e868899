//! HTTP size-suggestion provider.
//!
//! POSTs `{"featureDescription", "prompt"}` as JSON to a configured endpoint
//! and expects `{"suggestedTShirtSize", "reasoning", "totalHours"?}` back.

use reqwest::Client;
use serde::Serialize;

use super::{build_prompt, SizeSuggester, SuggestError};
use crate::models::SuggestionOutput;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestBody<'a> {
    feature_description: &'a str,
    prompt: String,
}

/// Remote provider backed by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSuggester {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpSuggester {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self) -> reqwest::RequestBuilder {
        let mut req = self.client.post(&self.endpoint);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }
}

#[async_trait::async_trait]
impl SizeSuggester for HttpSuggester {
    async fn suggest(&self, description: &str) -> Result<SuggestionOutput, SuggestError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(SuggestError::EmptyDescription);
        }

        let response = self
            .request()
            .json(&SuggestBody {
                feature_description: description,
                prompt: build_prompt(description),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SuggestError::InvalidResponse(e.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_description_skips_request() {
        // Unroutable endpoint: reaching the network would fail with Http instead.
        let suggester = HttpSuggester::new("http://127.0.0.1:9/suggest", None);
        let result = suggester.suggest("").await;
        assert!(matches!(result, Err(SuggestError::EmptyDescription)));
    }

    #[test]
    fn test_body_uses_camel_case() {
        let body = SuggestBody {
            feature_description: "Login form",
            prompt: build_prompt("Login form"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["featureDescription"], "Login form");
        assert!(json["prompt"].as_str().unwrap().contains("Login form"));
    }
}
