use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, RequestPacer};

/// Client for the keyless Google Translate web endpoint
///
/// The endpoint answers with nested JSON arrays; the first element holds one
/// `[translated, original, ...]` segment per sentence.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
    /// Client-side request pacing
    pacer: RequestPacer,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout: Duration, rate_limit: Option<u32>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            pacer: RequestPacer::new(rate_limit),
        })
    }

    fn api_url(&self) -> String {
        format!("{}/translate_a/single", self.endpoint)
    }

    /// Concatenate the translated segments of a response body
    pub fn extract_translation(body: &Value) -> Result<String, ProviderError> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Response has no translation segments".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError("Response contained an empty translation".to_string()));
        }
        Ok(translated)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        self.pacer.wait().await;

        let response = self.client
            .get(self.api_url())
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(format!("Google Translate answered {}", status)));
        }
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let translated = Self::extract_translation(&body)?;
        debug!("Google Translate: {} chars -> {} chars", text.chars().count(), translated.chars().count());
        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        // Any HTTP answer proves the host is reachable without spending a translation
        let response = self.client.head(&self.endpoint).send().await?;
        debug!("Google Translate reachable ({})", response.status());
        Ok(())
    }

    fn name(&self) -> &str {
        "Google Translate"
    }
}
