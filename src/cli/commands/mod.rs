//! Command implementations for the Tekst CLI.

mod config;
mod summary;
mod toc;
mod transcript;

pub use config::run_config;
pub use summary::run_summary;
pub use toc::run_toc;
pub use transcript::run_transcript;

use crate::captions::extract_video_id;
use crate::error::TekstError;

/// Parse a URL or bare ID into a video ID, with a user-facing error.
fn parse_video_id(input: &str) -> anyhow::Result<String> {
    extract_video_id(input).ok_or_else(|| {
        TekstError::InvalidInput(format!(
            "not a YouTube link or video ID: {} (expected youtube.com, youtu.be, or an 11-character ID)",
            input
        ))
        .into()
    })
}

/// Map a service error to the message shown to the user.
///
/// The three failure families stay distinguishable: no captions, timed
/// out, and summarizer unavailable are different messages, not one generic
/// failure.
fn user_message(err: &TekstError) -> String {
    match err {
        TekstError::Fetch(e) if e.is_no_captions() => {
            format!(
                "This video has no captions or they are unavailable.\nReason: {}",
                e.message
            )
        }
        TekstError::Fetch(e) => {
            format!("Could not reach YouTube for captions.\nReason: {}", e.message)
        }
        TekstError::DeadlineExceeded(secs) => {
            format!(
                "The YouTube request took too long (over {} seconds). Try again or try another link.",
                secs
            )
        }
        TekstError::OpenAI(msg) | TekstError::Describer(msg) => {
            format!("The summarizer is unavailable: {}", msg)
        }
        other => other.to_string(),
    }
}
