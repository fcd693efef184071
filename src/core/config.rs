//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::chunking::{DEFAULT_MAX_BYTES, DEFAULT_MAX_ITEMS};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{normalize_source, Format};

/// Translation v2 REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Outbound proxies, keyed by scheme of the target URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<String>,
}

impl ProxyConfig {
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

/// Configuration for translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub target: String,
    /// `None` lets the API detect the source language
    pub source: Option<String>,
    pub format: Format,
    pub model: String,
    /// `None` means no request timeout
    pub timeout_ms: Option<u64>,
    /// When set, proxy environment variables are ignored
    pub proxy: Option<ProxyConfig>,
    pub base_url: String,
    pub max_batch_items: usize,
    pub max_batch_bytes: usize,
    pub max_attempts: u32,
    /// Backoff unit; attempt `i` waits `i * retry_backoff_ms` after a 429
    pub retry_backoff_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target: "zh-CN".to_string(),
            source: None,
            format: Format::Html,
            model: "nmt".to_string(),
            timeout_ms: None,
            proxy: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_batch_items: DEFAULT_MAX_ITEMS,
            max_batch_bytes: DEFAULT_MAX_BYTES,
            max_attempts: 3,
            retry_backoff_ms: 5000,
        }
    }
}

impl TranslatorConfig {
    /// Create a configuration with the given API key and defaults for everything else
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GTRANS_API_KEY").map_err(|_| TranslationError::ConfigError {
            message: "GTRANS_API_KEY environment variable is required".to_string(),
        })?;

        let mut config = Self::new(api_key);

        if let Ok(target) = std::env::var("GTRANS_TARGET") {
            config.target = target;
        }
        config.source = normalize_source(std::env::var("GTRANS_SOURCE").ok());
        if let Ok(format) = std::env::var("GTRANS_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(model) = std::env::var("GTRANS_MODEL") {
            config.model = model;
        }
        if let Ok(timeout) = std::env::var("GTRANS_TIMEOUT_MS") {
            let timeout_ms = timeout.parse::<u64>().map_err(|e| TranslationError::ConfigError {
                message: format!("GTRANS_TIMEOUT_MS: {}", e),
            })?;
            config.timeout_ms = Some(timeout_ms);
        }
        if let Ok(base_url) = std::env::var("GTRANS_BASE_URL") {
            config.base_url = base_url;
        }

        let proxy = ProxyConfig {
            http: std::env::var("GTRANS_HTTP_PROXY").ok(),
            https: std::env::var("GTRANS_HTTPS_PROXY").ok(),
        };
        if !proxy.is_empty() {
            config.proxy = Some(proxy);
        }

        Ok(config)
    }

    /// Load from a JSON or YAML file, chosen by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TranslationError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        config.source = normalize_source(config.source.take());

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "API key is required".to_string(),
            });
        }

        if self.base_url.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "base_url is required".to_string(),
            });
        }

        if self.target.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "target language is required".to_string(),
            });
        }

        if self.max_attempts == 0 {
            warn!("max_attempts is 0, every request is still sent once");
        }

        Ok(())
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the default source language; `auto` clears it
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = normalize_source(Some(source.into()));
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_batch_limits(mut self, max_items: usize, max_bytes: usize) -> Self {
        self.max_batch_items = max_items;
        self.max_batch_bytes = max_bytes;
        self
    }

    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_backoff_ms = backoff.as_millis() as u64;
        self
    }

    /// Request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "yaml" || ext == "yml"
        })
        .unwrap_or(false)
}
