use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, RequestPacer};

/// LibreTranslate client
#[derive(Debug)]
pub struct LibreTranslate {
    /// Base URL of the instance
    endpoint: String,
    /// API key, required by the public instance only
    api_key: String,
    /// HTTP client for making requests
    client: Client,
    /// Client-side request pacing
    pacer: RequestPacer,
}

/// Request body for `POST /translate`
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Successful response of `POST /translate`
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// Error body returned by LibreTranslate
#[derive(Debug, Deserialize)]
struct LibreTranslateErrorBody {
    error: String,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        rate_limit: Option<u32>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
            pacer: RequestPacer::new(rate_limit),
        })
    }

    fn request<'a>(&'a self, text: &'a str, target_language: &'a str) -> LibreTranslateRequest<'a> {
        LibreTranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
            api_key: Some(self.api_key.as_str()).filter(|key| !key.is_empty()),
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        self.pacer.wait().await;

        let response = self.client
            .post(format!("{}/translate", self.endpoint))
            .json(&self.request(text, target_language))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<LibreTranslateErrorBody>(&raw)
                .map(|body| body.error)
                .unwrap_or(raw);
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimitExceeded(message));
            }
            error!("LibreTranslate error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: LibreTranslateResponse = response.json().await?;
        Ok(body.translated_text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client
            .get(format!("{}/languages", self.endpoint))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: "LibreTranslate /languages request failed".to_string(),
            })
        }
    }

    fn name(&self) -> &str {
        "LibreTranslate"
    }
}
