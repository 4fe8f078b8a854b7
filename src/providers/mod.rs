/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported services:
 * - Google: the keyless Google Translate web endpoint
 * - LibreTranslate: hosted or self-hosted LibreTranslate
 * - Mock: deterministic provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation orchestrator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a piece of plain text into the target language
    ///
    /// # Arguments
    /// * `text` - Text to translate, never empty
    /// * `target_language` - Target language identifier as configured
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Human-readable provider name for logs
    fn name(&self) -> &str;
}

/// Spaces out request start times to honour a requests-per-minute limit
#[derive(Debug)]
pub struct RequestPacer {
    interval: Option<Duration>,
    next_slot: Mutex<Instant>,
}

impl RequestPacer {
    /// Create a pacer; `None` or `Some(0)` disables pacing
    pub fn new(rate_limit: Option<u32>) -> Self {
        let interval = rate_limit
            .filter(|rpm| *rpm > 0)
            .map(|rpm| Duration::from_millis(60_000 / u64::from(rpm)));
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Wait until the next request may start
    pub async fn wait(&self) {
        let Some(interval) = self.interval else {
            return;
        };

        let mut next_slot = self.next_slot.lock().await;
        let now = Instant::now();
        if *next_slot > now {
            tokio::time::sleep_until(*next_slot).await;
        }
        *next_slot = (*next_slot).max(now) + interval;
    }
}

/// Build the configured provider
pub fn build_provider(config: &TranslationConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let endpoint = config.get_endpoint();
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let rate_limit = config.get_rate_limit();

    let provider: Arc<dyn Provider> = match config.provider {
        TranslationProvider::Google => Arc::new(google::GoogleTranslate::new(endpoint, timeout, rate_limit)?),
        TranslationProvider::LibreTranslate => Arc::new(libretranslate::LibreTranslate::new(
            endpoint,
            config.get_api_key(),
            timeout,
            rate_limit,
        )?),
    };

    Ok(provider)
}

pub mod google;
pub mod libretranslate;
pub mod mock;
