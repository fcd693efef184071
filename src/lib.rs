//! gtrans - Google Translation API client using an API key
//!
//! This library batches text by item count and content size, sends each batch
//! to the Translation v2 REST API, retries rate-limited requests and parses the
//! replies into typed records. It also translates JSONL files line by line.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod processors;

// Re-export key types for convenience
pub use crate::core::{
    chunking::{split_list, split_list_by_content_size},
    client::ApiKeyTranslator,
    config::{ProxyConfig, TranslatorConfig},
    errors::{FailedResponse, Result, TranslationError},
    models::{
        Answer, DetectResponse, Format, LanguageResponse, LanguagesOptions, Query,
        TranslateOptions, TranslateResponse,
    },
};

pub use processors::jsonl::{JsonlOptions, JsonlProcessor, JsonlSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
