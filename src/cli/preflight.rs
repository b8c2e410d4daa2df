//! Pre-flight checks before expensive operations.
//!
//! Validates required configuration before starting operations that would
//! otherwise fail midway.

use crate::error::{Result, TekstError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Summaries need the OpenAI API key.
    Summarize,
    /// Tables of contents need the OpenAI API key (with a placeholder
    /// fallback, but a missing key would degrade every label).
    Toc,
    /// Raw transcripts only need the caption provider.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Summarize | Operation::Toc => check_api_key(),
        Operation::Transcript => Ok(()),
    }
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(TekstError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(TekstError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
