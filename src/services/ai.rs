use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::models::ImageData;

/// Errors that can occur when calling the generative AI service
#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("service throttled the request: HTTP {status}")]
    Throttled { status: u16 },

    #[error("API returned error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("response contained no candidate text")]
    EmptyResponse,
}

impl AiError {
    /// Throttling and transport timeouts are worth another attempt;
    /// everything else is final for this request.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Throttled { .. } => true,
            AiError::RequestError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Client for the generateContent-style AI endpoint
///
/// Builds the request payload (text prompt plus optional inline image),
/// posts it to the model selected per attempt, and digs the candidate text
/// out of the response envelope.
pub struct AiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl AiClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Invoke the model and return its raw text response
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImageData>,
    ) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            self.api_key
        );

        let mut parts = vec![json!({ "text": prompt })];
        if let Some(img) = image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": img.mime_type,
                    "data": img.data,
                }
            }));
        }
        let payload = json!({ "contents": [{ "parts": parts }] });

        tracing::debug!(model, "Dispatching generation request");

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        if status.as_u16() == 429 || status.as_u16() == 503 {
            return Err(AiError::Throttled {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(AiError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: Value = response.json().await?;

        let text = envelope
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .ok_or(AiError::EmptyResponse)?;

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(AiError::Throttled { status: 429 }.is_retryable());
        assert!(AiError::Throttled { status: 503 }.is_retryable());
        assert!(!AiError::ApiError {
            status: 400,
            message: "bad request".to_string()
        }
        .is_retryable());
        assert!(!AiError::EmptyResponse.is_retryable());
    }

    #[test]
    fn test_client_creation() {
        let client = AiClient::new(
            "https://ai.test/".to_string(),
            "test_key".to_string(),
            30,
        );
        assert_eq!(client.base_url, "https://ai.test/");
        assert_eq!(client.api_key, "test_key");
    }
}
