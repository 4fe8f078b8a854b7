/*!
 * Error types for the readme-translator application.
 *
 * This module contains custom error types for the different failure domains
 * of a run (provider, document, translation, publish), using the thiserror
 * crate for ergonomic error definitions.
 */

use std::fmt;

use thiserror::Error;

use crate::document::NodeId;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised by the Markdown document adapter
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The tree could not be rendered back to Markdown
    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    /// A text node had no replacement value when applying translations
    #[error("No translated value for text node {0}")]
    MissingTextValue(NodeId),
}

/// A single translation unit that the provider could not translate
#[derive(Debug)]
pub struct UnitFailure {
    /// Node the unit was extracted from
    pub node: NodeId,
    /// Leading part of the source text, for reporting
    pub excerpt: String,
    /// What the provider returned
    pub error: ProviderError,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} (\"{}\"): {}", self.node, self.excerpt, self.error)
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// One or more units failed; nothing was applied to the document
    #[error("{} of {total} translation units failed: {}", .failures.len(), join_failures(.failures))]
    UnitsFailed {
        /// Every failed unit, in document order
        failures: Vec<UnitFailure>,
        /// Number of units in the run
        total: usize,
    },

    /// Error while writing results back into the document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

fn join_failures(failures: &[UnitFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from the branch/commit/push/pull-request automation
#[derive(Error, Debug)]
pub enum PublishError {
    /// The external command could not be started
    #[error("Failed to run {step}: {message}")]
    Spawn {
        /// Publish step that was running
        step: String,
        /// Underlying I/O error
        message: String,
    },

    /// The external command exited unsuccessfully
    #[error("{step} failed ({status}): {stderr}")]
    CommandFailed {
        /// Publish step that was running
        step: String,
        /// Exit status as reported by the OS
        status: String,
        /// Trimmed stderr of the command
        stderr: String,
    },

    /// The external command did not finish in time
    #[error("{step} timed out after {secs} seconds")]
    Timeout {
        /// Publish step that was running
        step: String,
        /// Configured timeout
        secs: u64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// No source document where one was expected
    #[error("Input error: {0}")]
    Input(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the document adapter
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from the publish workflow
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
