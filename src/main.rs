//! Main entry point for the gtrans CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gtrans::cli::commands::{self, Commands};
use gtrans::{ApiKeyTranslator, TranslatorConfig};

/// gtrans - Google Translation API client
#[derive(Parser, Debug)]
#[command(name = "gtrans", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to GTRANS_API_KEY env var)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// JSON or YAML configuration file (defaults to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn load_config(args: &Args) -> anyhow::Result<TranslatorConfig> {
    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => match &args.api_key {
            // An explicit key makes the environment key optional
            Some(_) => TranslatorConfig::from_env().unwrap_or_default(),
            None => TranslatorConfig::from_env()?,
        },
    };

    if let Some(api_key) = &args.api_key {
        config.api_key = api_key.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = args.command.as_ref() else {
        println!("Please specify a command. Use --help for more information.");
        return Ok(());
    };

    let translator = ApiKeyTranslator::new(load_config(&args)?)?;

    match command {
        Commands::Languages { target, model } => {
            commands::handle_languages(&translator, target.clone(), model.clone()).await?;
        }
        Commands::Detect { text } => {
            commands::handle_detect(&translator, text.clone()).await?;
        }
        Commands::Translate {
            text,
            target,
            source,
            format,
            model,
        } => {
            commands::handle_translate(
                &translator,
                text.clone(),
                target.clone(),
                source.clone(),
                *format,
                model.clone(),
            )
            .await?;
        }
        Commands::Jsonl {
            input,
            output,
            target,
            source,
            text_field,
        } => {
            commands::handle_jsonl(
                &translator,
                input.clone(),
                output.clone(),
                target.clone(),
                source.clone(),
                text_field.clone(),
            )
            .await?;
        }
    }

    Ok(())
}
