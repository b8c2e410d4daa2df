//! Table-of-contents command implementation.

use super::{parse_video_id, user_message};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the toc command.
pub async fn run_toc(input: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Toc) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let video_id = parse_video_id(input)?;

    if let Some(model) = model {
        settings.toc.model = model;
    }

    let service = TranscriptService::new(settings)?;

    let spinner = Output::spinner("Fetching captions and building a table of contents...");
    match service.get_toc(&video_id).await {
        Ok(entries) => {
            spinner.finish_and_clear();
            for entry in &entries {
                Output::toc_entry(&entry.display_line(), &entry.url(&video_id));
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&user_message(&e));
            Err(e.into())
        }
    }
}
