//! Prompt templates for Tekst.
//!
//! Prompts can be customized by placing TOML files in a custom prompts
//! directory; variables use `{{name}}` syntax.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub toc: TocPrompts,
    pub summary: SummaryPrompts,
}


/// Prompts for per-segment TOC descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocPrompts {
    pub system: String,
    pub user: String,
}

impl Default for TocPrompts {
    fn default() -> Self {
        Self {
            system: "You build video tables of contents. Respond with exactly {{count}} \
                     lines, one short description per fragment, nothing else."
                .to_string(),

            user: r#"The transcript below is split into {{count}} fragments of a video, in order.
For each fragment write one short line (3-10 words) saying what it covers.
Output exactly {{count}} lines, one per fragment, in the same order. No numbering, no timestamps.

{{segments}}"#
                .to_string(),
        }
    }
}

/// Prompts for transcript summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: "You write concise video digests. Write exactly {{paragraphs}} \
                     paragraph(s), with no headings or lists."
                .to_string(),

            user: r#"Summarize the content of the video from its transcript. Answer in exactly {{paragraphs}} paragraph(s):
{{outline}}

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom
    /// directory overrides.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let toc_path = custom_path.join("toc.toml");
            if toc_path.exists() {
                let content = std::fs::read_to_string(&toc_path)?;
                prompts.toc = toml::from_str(&content)?;
            }

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
