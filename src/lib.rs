//! Tekst - YouTube transcript summaries and tables of contents
//!
//! The name "Tekst" is the Norwegian word for "text" — captions are
//! "undertekster".
//!
//! # Overview
//!
//! Tekst fetches a video's caption track despite an unreliable upstream
//! (rate limiting, geo-blocking, proxy rot) and deterministically
//! transforms it into two downstream shapes:
//!
//! - a flat transcript, truncated to a language-model character budget,
//!   for summarization
//! - a fixed-count table of contents with clickable timestamps, labeled by
//!   a language model
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `proxy` - Egress route resolution (override / list file / fallback /
//!   direct)
//! - `captions` - Caption provider trait, the YouTube adapter, and the
//!   multi-route fetcher
//! - `segmenter` - Deterministic fixed-count windowing of caption spans
//! - `describer` - Language-model boundary (segment labels, summaries)
//! - `service` - The public orchestration entry point
//!
//! # Example
//!
//! ```rust,no_run
//! use tekst::config::Settings;
//! use tekst::service::TranscriptService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TranscriptService::new(settings)?;
//!
//!     for entry in service.get_toc("dQw4w9WgXcQ").await? {
//!         println!("{}", entry.display_line());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod describer;
pub mod error;
pub mod openai;
pub mod proxy;
pub mod segmenter;
pub mod service;

pub use error::{Result, TekstError};
