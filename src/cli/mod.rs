//! CLI module for Tekst.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tekst - YouTube transcript summaries and tables of contents
///
/// Fetches a video's caption track (through a proxy chain if needed) and
/// turns it into a short summary or a clickable table of contents.
/// The name "Tekst" is the Norwegian word for "text" (captions are
/// "undertekster").
#[derive(Parser, Debug)]
#[command(name = "tekst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a video from its captions
    Summary {
        /// YouTube URL or video ID
        input: String,

        /// Number of summary paragraphs (2, 4, 8, or 10 work well)
        #[arg(short, long)]
        paragraphs: Option<usize>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Build a table of contents with clickable timestamps
    Toc {
        /// YouTube URL or video ID
        input: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Print the flattened transcript (truncated to the LLM budget)
    Transcript {
        /// YouTube URL or video ID
        input: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
