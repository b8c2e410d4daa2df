//! Transcript command implementation.

use super::{parse_video_id, user_message};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(input: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcript)?;

    let video_id = parse_video_id(input)?;
    let service = TranscriptService::new(settings)?;

    let spinner = Output::spinner("Fetching captions...");
    match service.get_summary_input(&video_id).await {
        Ok(text) => {
            spinner.finish_and_clear();
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&user_message(&e));
            Err(e.into())
        }
    }
}
