//! Language-model boundary for Tekst.
//!
//! Two capabilities cross this boundary: one short description per TOC
//! segment, and a paragraph-count summary of a whole transcript. Both are
//! external collaborators; the core only depends on these traits.

mod openai;

pub use openai::{OpenAiDescriber, OpenAiSummarizer};

use crate::error::Result;
use crate::segmenter::Segment;
use async_trait::async_trait;

/// Placeholder label used when the describer cannot produce one.
pub const PLACEHOLDER_LABEL: &str = "—";

/// Produces one short label per segment, order-preserving, same count as
/// the input.
#[async_trait]
pub trait Describer: Send + Sync {
    async fn describe_segments(&self, segments: &[Segment]) -> Result<Vec<String>>;
}

/// Produces a fixed-paragraph-count summary of a transcript.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str, paragraphs: usize) -> Result<String>;
}
