//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::core::client::ApiKeyTranslator;
use crate::core::models::{Format, LanguagesOptions, Query, TranslateOptions};
use crate::processors::jsonl::{JsonlOptions, JsonlProcessor};

/// Commands for gtrans
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported languages
    Languages {
        /// Language used for the language names (default: configured target)
        #[arg(short, long)]
        target: Option<String>,

        /// Translation model (default: configured model)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Detect the language of one or more texts
    Detect {
        /// Texts to inspect
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Translate one or more texts
    Translate {
        /// Texts to translate
        #[arg(required = true)]
        text: Vec<String>,

        /// Target language (default: configured target)
        #[arg(short, long)]
        target: Option<String>,

        /// Source language ("auto" to detect)
        #[arg(short, long)]
        source: Option<String>,

        /// Input format: html or text
        #[arg(short, long)]
        format: Option<Format>,

        /// Translation model: nmt or base
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Translate the text field of every line of a JSONL file
    Jsonl {
        /// Input JSONL file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long)]
        output: PathBuf,

        /// Target language (default: configured target)
        #[arg(short, long)]
        target: Option<String>,

        /// Source language ("auto" to detect)
        #[arg(short, long)]
        source: Option<String>,

        /// Field holding the text to translate
        #[arg(long, default_value = "text")]
        text_field: String,
    },
}

/// One query argument stays a single string, several become a list
fn query_from_args(mut text: Vec<String>) -> Query {
    if text.len() == 1 {
        Query::One(text.remove(0))
    } else {
        Query::Many(text)
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle languages command
pub async fn handle_languages(
    translator: &ApiKeyTranslator,
    target: Option<String>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let options = LanguagesOptions {
        target,
        model,
        ..Default::default()
    };

    let languages = translator.languages(options).await?;
    info!("{} languages supported", languages.len());

    print_json(&languages)
}

/// Handle detect command
pub async fn handle_detect(translator: &ApiKeyTranslator, text: Vec<String>) -> anyhow::Result<()> {
    let detections = translator.detect(query_from_args(text), None).await?;
    print_json(&detections)
}

/// Handle translate command
pub async fn handle_translate(
    translator: &ApiKeyTranslator,
    text: Vec<String>,
    target: Option<String>,
    source: Option<String>,
    format: Option<Format>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let options = TranslateOptions {
        target,
        source,
        format,
        model,
        timeout: None,
    };

    let translations = translator.translate(query_from_args(text), options).await?;
    print_json(&translations)
}

/// Handle JSONL translation command
pub async fn handle_jsonl(
    translator: &ApiKeyTranslator,
    input: PathBuf,
    output: PathBuf,
    target: Option<String>,
    source: Option<String>,
    text_field: String,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    info!("Starting JSONL translation");
    info!("Input: {}", input.display());
    info!("Output: {}", output.display());

    let processor = JsonlProcessor::new(translator.clone()).with_options(JsonlOptions {
        text_field,
        target,
        source,
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Translating {}", input.display()));
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = processor.translate_file(&input, &output).await;
    pb.finish_and_clear();
    let summary = result?;

    let duration = start_time.elapsed();
    println!("\n✅ Translation completed!");
    println!("   Lines: {}", summary.lines);
    println!("   Translated: {}", summary.translated);
    println!("   Time: {:?}", duration);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_args() {
        assert_eq!(query_from_args(vec!["hi".to_string()]), Query::One("hi".to_string()));
        assert_eq!(
            query_from_args(vec!["a".to_string(), "b".to_string()]),
            Query::Many(vec!["a".to_string(), "b".to_string()])
        );
    }
}
