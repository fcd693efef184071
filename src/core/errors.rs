//! Custom error types for translation operations

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reply from the API that ended with a non-200 status.
///
/// This is the value callers inspect when a call fails at the API level,
/// whichever operation produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedResponse {
    /// HTTP status code of the last attempt
    pub status: u16,
    /// Requested URL (without query string)
    pub url: String,
    /// Raw response body
    pub body: String,
}

impl fmt::Display for FailedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.status, self.url)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The API answered with a non-200 status (after rate-limit retries)
    #[error("Request failed: {0}")]
    RequestFailed(FailedResponse),

    /// A 200 reply whose body did not have the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse {
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Transport failure (connect, DNS, timeout)
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl TranslationError {
    /// The failed API reply, if this error is one.
    pub fn failed_response(&self) -> Option<&FailedResponse> {
        match self {
            TranslationError::RequestFailed(failed) => Some(failed),
            _ => None,
        }
    }

    /// Whether the API rejected the request (as opposed to a transport or parse failure).
    pub fn is_request_failed(&self) -> bool {
        matches!(self, TranslationError::RequestFailed(_))
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
