/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with tagged text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::failing_on(text)` - Fails only for one source text
 * - `MockProvider::intermittent(n)` - Fails every Nth request
 *
 * Per-text delays make completion order controllable.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails for this exact source text, succeeds otherwise
    FailOn { text: String },
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Texts in the order their requests started
    requests: Arc<Mutex<Vec<String>>>,
    /// Texts in the order their responses completed
    completions: Arc<Mutex<Vec<String>>>,
    /// Artificial latency per source text
    delays: HashMap<String, Duration>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str, &str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            completions: Arc::new(Mutex::new(Vec::new())),
            delays: HashMap::new(),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only for `text`
    pub fn failing_on(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailOn { text: text.into() })
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Delay the response for one source text
    pub fn with_delay(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(text.into(), delay);
        self
    }

    /// Set a custom response generator taking `(text, target_language)`
    pub fn with_custom_response(mut self, generator: fn(&str, &str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of translate calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Source texts in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Source texts in completion order
    pub fn completions(&self) -> Vec<String> {
        self.completions.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Default translation produced by a working mock
    pub fn tag(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            completions: Arc::clone(&self.completions),
            delays: self.delays.clone(),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(text.to_string());
        }

        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }

        let result = match &self.behavior {
            MockBehavior::Working => Ok(()),
            MockBehavior::FailOn { text: failing } if failing == text => Err(ProviderError::ApiError {
                message: format!("Simulated failure for \"{}\"", text),
                status_code: 500,
            }),
            MockBehavior::FailOn { .. } => Ok(()),
            MockBehavior::Intermittent { fail_every } if *fail_every > 0 && count % fail_every == fail_every - 1 => {
                Err(ProviderError::RateLimitExceeded(format!(
                    "Simulated intermittent failure (request #{})",
                    count + 1
                )))
            }
            MockBehavior::Intermittent { .. } => Ok(()),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
        };

        if let Ok(mut completions) = self.completions.lock() {
            completions.push(text.to_string());
        }

        result.map(|()| match self.custom_response {
            Some(generator) => generator(text, target_language),
            None => Self::tag(text, target_language),
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
