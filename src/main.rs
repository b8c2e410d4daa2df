//! Tekst CLI entry point.

use anyhow::Result;
use clap::Parser;
use tekst::cli::{commands, Cli, Commands};
use tekst::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tekst={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Summary {
            input,
            paragraphs,
            model,
        } => {
            commands::run_summary(input, *paragraphs, model.clone(), settings).await?;
        }

        Commands::Toc { input, model } => {
            commands::run_toc(input, model.clone(), settings).await?;
        }

        Commands::Transcript { input } => {
            commands::run_transcript(input, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
