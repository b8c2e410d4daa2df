//! Configuration settings for Tekst.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub proxy: ProxySettings,
    pub fetch: FetchSettings,
    pub summary: SummarySettings,
    pub toc: TocSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Proxy chain sources, in resolution precedence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Explicit override: comma- or newline-delimited proxy URIs. When
    /// unset, the `YOUTUBE_PROXY` environment variable is consulted.
    pub override_routes: Option<String>,
    /// Multi-line proxy list file, one URI per line.
    pub list_file: String,
    /// Single-proxy fallback file.
    pub fallback_file: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            override_routes: None,
            list_file: "~/.tekst/proxies_working_list.txt".to_string(),
            fallback_file: "~/.tekst/proxy_working.txt".to_string(),
        }
    }
}

/// Caption fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Caption language preference order; the first available track wins.
    pub languages: Vec<String>,
    /// Hard wall-clock deadline for the whole fetch stage, in seconds.
    pub deadline_seconds: u64,
    /// Per-HTTP-request timeout, in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            languages: vec!["ru".to_string(), "en".to_string()],
            deadline_seconds: 45,
            request_timeout_seconds: 12,
        }
    }
}

/// Summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// LLM model for summaries.
    pub model: String,
    /// Character budget for the transcript passed to the LLM; longer
    /// transcripts are truncated with a marker.
    pub max_transcript_chars: usize,
    /// Default number of summary paragraphs.
    pub paragraphs: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_transcript_chars: 12_000,
            paragraphs: 2,
        }
    }
}

/// Table-of-contents settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocSettings {
    /// LLM model for segment descriptions.
    pub model: String,
    /// Number of TOC segments per video.
    pub segments: usize,
    /// Character cap per segment text in the description prompt.
    pub max_segment_chars: usize,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            segments: 10,
            max_segment_chars: 1500,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TekstError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tekst")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
