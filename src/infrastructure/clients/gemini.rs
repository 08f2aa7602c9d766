use crate::config::cli::API_KEY_ENV;
use crate::error::{GameError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use tracing::{error, info};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single-prompt request with Google Search grounding and a JSON
    /// response constrained to `response_schema`.
    pub fn grounded_json(prompt: impl Into<String>, response_schema: Value) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            tools: vec![Tool::google_search()],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: GoogleSearch {},
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn grounding_metadata(&self) -> Option<&GroundingMetadata> {
        self.candidates.first()?.grounding_metadata.as_ref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Builds the error for a non-success reply. The provider's own message is
/// preferred, then the raw body, then the status's canonical reason.
fn provider_error(status: StatusCode, body: Option<String>) -> GameError {
    let body = body.filter(|b| !b.trim().is_empty());
    let message = match body {
        Some(body) => serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body),
        None => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    GameError::Provider {
        status: status.as_u16(),
        message,
    }
}

/// Anything that can answer a `generateContent` call.
pub trait ContentGenerator: Send + Sync {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse>> + Send;
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let model = model.into();
        info!("Created new Gemini client for model {}", model);
        Self {
            client,
            api_key,
            model,
            api_base: api_base.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GameError::MissingCredential(API_KEY_ENV))
    }
}

impl ContentGenerator for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Gemini API error: Status {}", status);
            return Err(provider_error(status, response.text().await.ok()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(
            Client::new(),
            api_key.map(str::to_string),
            "gemini-test",
            "https://example.invalid/v1beta/",
        )
    }

    #[test]
    fn request_enables_search_and_json_output() {
        let request = GenerateContentRequest::grounded_json("hello", json!({ "type": "ARRAY" }));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["tools"][0]["googleSearch"], json!({}));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert_eq!(request.prompt(), Some("hello"));
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        assert_eq!(
            client(Some("k")).endpoint(),
            "https://example.invalid/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn text_concatenates_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "[{\"a\":" }, { "text": "1}]" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("[{\"a\":1}]"));
        assert!(response.grounding_metadata().is_none());
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), None);
    }

    fn provider_message(status: StatusCode, body: Option<&str>) -> String {
        match provider_error(status, body.map(str::to_string)) {
            GameError::Provider { status: code, message } => {
                assert_eq!(code, status.as_u16());
                message
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn provider_error_prefers_api_message_then_body_then_reason() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            provider_message(StatusCode::BAD_REQUEST, Some(body)),
            "API key not valid"
        );
        assert_eq!(
            provider_message(StatusCode::BAD_GATEWAY, Some("upstream down")),
            "upstream down"
        );
        assert_eq!(
            provider_message(StatusCode::SERVICE_UNAVAILABLE, None),
            "Service Unavailable"
        );
        assert_eq!(
            provider_message(StatusCode::FORBIDDEN, Some("  ")),
            "Forbidden"
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_before_network() {
        let request = GenerateContentRequest::grounded_json("hello", json!({}));
        for key in [None, Some(""), Some("   ")] {
            let err = client(key).generate_content(&request).await.unwrap_err();
            assert!(matches!(err, GameError::MissingCredential(API_KEY_ENV)));
        }
    }
}
