//! OpenAI-backed describer and summarizer.

use super::{Describer, Summarizer, PLACEHOLDER_LABEL};
use crate::config::Prompts;
use crate::error::{Result, TekstError};
use crate::openai::create_client;
use crate::segmenter::Segment;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Separator between segment texts in the description prompt.
const SEGMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Output budget for the description call.
const TOC_MAX_TOKENS: u32 = 800;

/// Generates one short description per TOC segment via chat completions.
pub struct OpenAiDescriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
    max_segment_chars: usize,
}

impl OpenAiDescriber {
    pub fn new(model: &str, prompts: Prompts, max_segment_chars: usize) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            prompts,
            max_segment_chars,
        }
    }
}

#[async_trait]
impl Describer for OpenAiDescriber {
    async fn describe_segments(&self, segments: &[Segment]) -> Result<Vec<String>> {
        let count = segments.len().to_string();

        let body = segments
            .iter()
            .map(|s| clip(&s.text, self.max_segment_chars))
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);

        let mut vars = HashMap::new();
        vars.insert("count".to_string(), count);
        vars.insert("segments".to_string(), body);

        let system = Prompts::render(&self.prompts.toc.system, &vars);
        let user = Prompts::render(&self.prompts.toc.user, &vars);

        let raw = complete(&self.client, &self.model, &system, &user, TOC_MAX_TOKENS).await?;

        // One label per line; clip extras, pad shortfalls with a placeholder
        // so the caller always gets exactly segments.len() labels.
        let mut labels: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(segments.len())
            .map(str::to_string)
            .collect();

        if labels.len() < segments.len() {
            debug!(
                expected = segments.len(),
                got = labels.len(),
                "describer returned too few labels, padding"
            );
            labels.resize(segments.len(), PLACEHOLDER_LABEL.to_string());
        }

        Ok(labels)
    }
}

/// Generates paragraph-count summaries via chat completions.
pub struct OpenAiSummarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl OpenAiSummarizer {
    pub fn new(model: &str, prompts: Prompts) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            prompts,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, transcript: &str, paragraphs: usize) -> Result<String> {
        let paragraphs = paragraphs.max(1);

        let mut vars = HashMap::new();
        vars.insert("paragraphs".to_string(), paragraphs.to_string());
        vars.insert("outline".to_string(), summary_outline(paragraphs));
        vars.insert("transcript".to_string(), transcript.to_string());

        let system = Prompts::render(&self.prompts.summary.system, &vars);
        let user = Prompts::render(&self.prompts.summary.user, &vars);

        complete(
            &self.client,
            &self.model,
            &system,
            &user,
            summary_max_tokens(paragraphs),
        )
        .await
    }
}

/// Numbered outline telling the model what each paragraph should cover.
fn summary_outline(paragraphs: usize) -> String {
    (1..=paragraphs)
        .map(|i| match i {
            1 => "1) What the video is about, its main topic.".to_string(),
            2 => "2) Key takeaways, advice, or ideas.".to_string(),
            n => format!("{}) Further important points.", n),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output budget scales with the requested paragraph count, capped.
fn summary_max_tokens(paragraphs: usize) -> u32 {
    let extra = paragraphs.saturating_sub(2) as u32;
    (500 + extra * 150).min(1000)
}

/// One chat completion round trip.
async fn complete(
    client: &async_openai::Client<async_openai::config::OpenAIConfig>,
    model: &str,
    system: &str,
    user: &str,
    max_tokens: u32,
) -> Result<String> {
    let messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system.to_string())
            .build()
            .map_err(|e| TekstError::Describer(e.to_string()))?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user.to_string())
            .build()
            .map_err(|e| TekstError::Describer(e.to_string()))?
            .into(),
    ];

    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .max_completion_tokens(max_tokens)
        .build()
        .map_err(|e| TekstError::Describer(e.to_string()))?;

    let response = client
        .chat()
        .create(request)
        .await
        .map_err(|e| TekstError::OpenAI(e.to_string()))?;

    let content = response
        .choices
        .first()
        .and_then(|c| c.message.content.as_ref())
        .ok_or_else(|| TekstError::Describer("empty response from LLM".to_string()))?;

    Ok(content.trim().to_string())
}

/// Clip text to a character budget with an ellipsis.
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(max_chars).collect();
        format!("{}...", clipped)
    }
}
