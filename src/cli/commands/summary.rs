//! Summary command implementation.

use super::{parse_video_id, user_message};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the summary command.
pub async fn run_summary(
    input: &str,
    paragraphs: Option<usize>,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarize) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let video_id = parse_video_id(input)?;
    let paragraphs = paragraphs.unwrap_or(settings.summary.paragraphs);

    if let Some(model) = model {
        settings.summary.model = model;
    }

    let service = TranscriptService::new(settings)?;

    let spinner = Output::spinner("Fetching captions and summarizing...");
    match service.summarize(&video_id, paragraphs).await {
        Ok(summary) => {
            spinner.finish_and_clear();
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&user_message(&e));
            Err(e.into())
        }
    }
}
