use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::{ItineraryRules, RankingProvider, build_prompt, parse_ranked_results, response_schema};
use crate::config::RankingConfig;
use crate::models::{AnchorSet, ResultSet};
use crate::{HubSpokeError, Result};

/// Generative-AI backend prompted to simulate mapping data and rank hotels
pub struct GeminiRankingClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_results: usize,
    anchors: AnchorSet,
    rules: ItineraryRules,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiRankingClient {
    /// Create a new client. A missing credential is only reported when fetching.
    pub fn new(config: &RankingConfig, anchors: AnchorSet) -> Result<Self> {
        let mut builder = Client::builder().user_agent("hubspoke/0.1.0");
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds.into()));
        }
        let client = builder
            .build()
            .map_err(|e| HubSpokeError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_results: config.max_results as usize,
            anchors,
            rules: ItineraryRules {
                top_n: config.max_results,
                ..ItineraryRules::default()
            },
        })
    }

    #[must_use]
    pub fn with_rules(mut self, rules: ItineraryRules) -> Self {
        self.rules = rules;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(&self.anchors, &self.rules),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: self.temperature,
            },
        }
    }

    async fn request(&self, api_key: &str) -> Result<ResultSet> {
        let body = self.request_body();
        debug!(endpoint = %self.endpoint(), "Sending ranking request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| HubSpokeError::request_failure(format!("Ranking request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    HubSpokeError::request_failure(format!(
                        "Ranking service rejected the API key ({status}): {error_text}"
                    ))
                }
                _ => HubSpokeError::request_failure(format!(
                    "Ranking service error {status}: {error_text}"
                )),
            });
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            HubSpokeError::request_failure(format!("Failed to parse ranking response: {e}"))
        })?;

        let text = payload.text().ok_or(HubSpokeError::EmptyResponse)?;
        parse_ranked_results(&text, self.max_results)
    }
}

#[async_trait]
impl RankingProvider for GeminiRankingClient {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn fetch_ranked_results(&self) -> Result<ResultSet> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| HubSpokeError::config("API Key is missing"))?;

        info!("Requesting ranked hotels for {} anchors", self.anchors.len());
        match self.request(api_key).await {
            Ok(results) => {
                info!("Received {} ranked hotels", results.len());
                Ok(results)
            }
            Err(e) => {
                error!("Ranking service error: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubSpokeConfig;

    fn client(api_key: Option<&str>) -> GeminiRankingClient {
        let mut config = HubSpokeConfig::default().ranking;
        config.api_key = api_key.map(str::to_string);
        // Nothing listens here; any request attempt fails fast.
        config.base_url = "http://127.0.0.1:9/v1beta/".to_string();
        GeminiRankingClient::new(&config, AnchorSet::nanjing()).unwrap()
    }

    #[test]
    fn test_endpoint_includes_model() {
        assert_eq!(
            client(Some("k")).endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(client(Some("k")).request_body()).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("Hub and Spoke"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let payload: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "[" }, { "text": "]" }] } }]
        }))
        .unwrap();
        assert_eq!(payload.text().as_deref(), Some("[]"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let payload: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "promptFeedback": {} })).unwrap();
        assert!(payload.text().is_none());
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let err = client(None).fetch_ranked_results().await.unwrap_err();
        assert!(matches!(err, HubSpokeError::Config { .. }));
        assert_eq!(err.user_message(), "API Key is missing");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_request_failure() {
        let err = client(Some("k")).fetch_ranked_results().await.unwrap_err();
        assert!(matches!(err, HubSpokeError::RequestFailure { .. }));
    }
}
