//! Configuration module for Tekst.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts, TocPrompts};
pub use settings::{
    FetchSettings, GeneralSettings, PromptSettings, ProxySettings, Settings, SummarySettings,
    TocSettings,
};
