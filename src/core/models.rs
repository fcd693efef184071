//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::core::errors::TranslationError;

/// Output format of translated text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Input is HTML, markup is kept
    #[default]
    Html,
    /// Plain text
    Text,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Text => "text",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Format::Html),
            "text" => Ok(Format::Text),
            other => Err(TranslationError::ConfigError {
                message: format!("unknown format: {}", other),
            }),
        }
    }
}

/// One entry of the supported-languages list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub language: String,
    /// Display name in the requested target language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Language detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reliable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    /// Present only when the source language was auto-detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `{"data": ...}` wrapper shared by every endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguagesData {
    pub languages: Vec<LanguageResponse>,
}

/// Each detection comes wrapped in its own list; only the first entry is used.
#[derive(Debug, Deserialize)]
pub(crate) struct DetectionsData {
    pub detections: Vec<Vec<DetectResponse>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslationsData {
    pub translations: Vec<TranslateResponse>,
}

/// Text submitted to `detect` or `translate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A single string, answered with a single record
    One(String),
    /// A list of strings, answered with a list in the same order
    Many(Vec<String>),
}

impl Query {
    /// The query as a slice of strings
    pub fn items(&self) -> &[String] {
        match self {
            Query::One(text) => std::slice::from_ref(text),
            Query::Many(texts) => texts,
        }
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Query::One(_))
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Query::One(text)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Query::One(text.to_string())
    }
}

impl From<&String> for Query {
    fn from(text: &String) -> Self {
        Query::One(text.clone())
    }
}

impl From<Vec<String>> for Query {
    fn from(texts: Vec<String>) -> Self {
        Query::Many(texts)
    }
}

impl From<Vec<&str>> for Query {
    fn from(texts: Vec<&str>) -> Self {
        Query::Many(texts.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Query {
    fn from(texts: &[&str]) -> Self {
        Query::Many(texts.iter().map(|t| t.to_string()).collect())
    }
}

impl From<&[String]> for Query {
    fn from(texts: &[String]) -> Self {
        Query::Many(texts.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Query {
    fn from(texts: [&str; N]) -> Self {
        Query::Many(texts.iter().map(|t| t.to_string()).collect())
    }
}

/// Result shape matching the [`Query`] shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Answer<T> {
    /// The single record, if the query was a single string
    pub fn one(self) -> Option<T> {
        match self {
            Answer::One(record) => Some(record),
            Answer::Many(_) => None,
        }
    }

    /// All records in query order
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Answer::One(record) => vec![record],
            Answer::Many(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Answer::One(_) => 1,
            Answer::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-call overrides for `translate`; unset fields fall back to the client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    pub target: Option<String>,
    pub source: Option<String>,
    pub format: Option<Format>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Per-call overrides for `languages`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguagesOptions {
    pub target: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl LanguagesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// `auto` means "detect the source language", which the API expresses by omitting it.
pub fn normalize_source(source: Option<String>) -> Option<String> {
    source.filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("auto"))
}
