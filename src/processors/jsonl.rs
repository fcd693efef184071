//! Line-delimited JSON (JSONL) file translation

use std::path::Path;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info};

use crate::core::client::ApiKeyTranslator;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::TranslateOptions;

/// Field added to each translated object
pub const TRANSLATED_FIELD: &str = "translatedText";

/// Options for a JSONL run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonlOptions {
    /// Field holding the text to translate
    pub text_field: String,
    pub target: Option<String>,
    pub source: Option<String>,
}

impl Default for JsonlOptions {
    fn default() -> Self {
        Self {
            text_field: "text".to_string(),
            target: None,
            source: None,
        }
    }
}

/// Counts from a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonlSummary {
    /// Objects written to the output
    pub lines: usize,
    /// Objects that gained a translation
    pub translated: usize,
}

/// Translates JSONL files one line at a time, one request per line
#[derive(Debug, Clone)]
pub struct JsonlProcessor {
    translator: ApiKeyTranslator,
    options: JsonlOptions,
}

impl JsonlProcessor {
    pub fn new(translator: ApiKeyTranslator) -> Self {
        Self {
            translator,
            options: JsonlOptions::default(),
        }
    }

    pub fn with_options(mut self, options: JsonlOptions) -> Self {
        self.options = options;
        self
    }

    /// Translate `input` into `output`, creating the output's parent directory if needed
    pub async fn translate_file(&self, input: &Path, output: &Path) -> Result<JsonlSummary> {
        debug!("Translating JSONL: {} -> {}", input.display(), output.display());

        let reader = tokio::fs::File::open(input)
            .await
            .map_err(|e| TranslationError::FileError {
                path: input.display().to_string(),
                message: e.to_string(),
            })?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TranslationError::FileError {
                        path: parent.display().to_string(),
                        message: e.to_string(),
                    })?;
            }
        }

        let writer = tokio::fs::File::create(output)
            .await
            .map_err(|e| TranslationError::FileError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;

        let summary = self
            .translate_stream(BufReader::new(reader), BufWriter::new(writer))
            .await?;

        info!(
            "Translated {} of {} lines from {}",
            summary.translated,
            summary.lines,
            input.display()
        );
        Ok(summary)
    }

    /// Translate line by line from `reader` to `writer`, preserving line order.
    ///
    /// Lines already written are flushed before an error is returned.
    pub async fn translate_stream<R, W>(&self, reader: R, mut writer: W) -> Result<JsonlSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut summary = JsonlSummary::default();

        let result = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e.into()),
            };

            if line.trim().is_empty() {
                continue;
            }

            match self.translate_line(&line).await {
                Ok((out, translated)) => {
                    writer.write_all(out.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                    summary.lines += 1;
                    if translated {
                        summary.translated += 1;
                    }
                }
                Err(e) => break Err(e),
            }
        };

        writer.flush().await?;
        result.map(|()| summary)
    }

    /// Returns the output line and whether a translation was added
    async fn translate_line(&self, line: &str) -> Result<(String, bool)> {
        let mut value: Value = serde_json::from_str(line.trim())?;

        let text = match value.get(&self.options.text_field).and_then(Value::as_str) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => return Ok((serde_json::to_string(&value)?, false)),
        };

        let mut options = TranslateOptions::new();
        options.target = self.options.target.clone();
        options.source = self.options.source.clone();

        let translated = self
            .translator
            .translate(text, options)
            .await?
            .one()
            .ok_or_else(|| TranslationError::InvalidResponse {
                message: "expected a single translation".to_string(),
            })?;

        if let Value::Object(map) = &mut value {
            map.insert(
                TRANSLATED_FIELD.to_string(),
                Value::String(translated.translated_text),
            );
        }

        Ok((serde_json::to_string(&value)?, true))
    }
}
