//! Transcript service for Tekst.
//!
//! The only public entry point callers use: coordinates proxy-chain
//! resolution, caption fetching, segmentation, and the language-model
//! boundary into the two downstream shapes (flat transcript, labeled TOC).

use crate::captions::{flatten, CaptionFetcher, CaptionProvider, CaptionSpan, YoutubeCaptions};
use crate::config::{Prompts, Settings};
use crate::describer::{
    Describer, OpenAiDescriber, OpenAiSummarizer, Summarizer, PLACEHOLDER_LABEL,
};
use crate::error::{FetchError, Result, TekstError};
use crate::proxy::ProxyChainResolver;
use crate::segmenter::segment;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Marker appended when a transcript is cut to the character budget.
pub const TRUNCATION_MARKER: &str = "\n[... truncated ...]";

/// One table-of-contents entry: an anchor timestamp and a short label.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Anchor timestamp in seconds.
    pub anchor_seconds: f64,
    /// Short description of the segment.
    pub label: String,
}

impl TocEntry {
    /// Render as `"{mm:ss} — {label}"`.
    pub fn display_line(&self) -> String {
        format!("{} — {}", format_timestamp(self.anchor_seconds), self.label)
    }

    /// Deep link to the anchor within the video.
    pub fn url(&self, video_id: &str) -> String {
        format!(
            "https://www.youtube.com/watch?v={}&t={}",
            video_id, self.anchor_seconds as u64
        )
    }
}

/// Format seconds as M:SS or H:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Orchestrates caption fetch, segmentation, and description.
pub struct TranscriptService {
    settings: Settings,
    resolver: ProxyChainResolver,
    fetcher: CaptionFetcher,
    describer: Arc<dyn Describer>,
    summarizer: Arc<dyn Summarizer>,
}

impl TranscriptService {
    /// Create a service with the default (YouTube + OpenAI) components.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        let provider: Arc<dyn CaptionProvider> = Arc::new(YoutubeCaptions::with_request_timeout(
            Duration::from_secs(settings.fetch.request_timeout_seconds),
        ));
        let describer: Arc<dyn Describer> = Arc::new(OpenAiDescriber::new(
            &settings.toc.model,
            prompts.clone(),
            settings.toc.max_segment_chars,
        ));
        let summarizer: Arc<dyn Summarizer> = Arc::new(OpenAiSummarizer::new(
            &settings.summary.model,
            prompts,
        ));

        Ok(Self::with_components(
            settings, provider, describer, summarizer,
        ))
    }

    /// Create a service with custom components.
    pub fn with_components(
        settings: Settings,
        provider: Arc<dyn CaptionProvider>,
        describer: Arc<dyn Describer>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let resolver = ProxyChainResolver::new(&settings.proxy);
        let fetcher = CaptionFetcher::new(provider, settings.fetch.languages.clone());

        Self {
            settings,
            resolver,
            fetcher,
            describer,
            summarizer,
        }
    }

    /// Fetch and flatten a transcript, truncated to the LLM character
    /// budget.
    #[instrument(skip(self))]
    pub async fn get_summary_input(&self, video_id: &str) -> Result<String> {
        let spans = self.fetch_with_deadline(video_id).await?;
        Ok(truncate_transcript(
            &flatten(&spans),
            self.settings.summary.max_transcript_chars,
        ))
    }

    /// Fetch a transcript and summarize it into `paragraphs` paragraphs.
    ///
    /// The fetch and the summarization are independent failures: a fetch
    /// error never reaches the summarizer, and a summarizer error does not
    /// invalidate the fetched transcript.
    #[instrument(skip(self))]
    pub async fn summarize(&self, video_id: &str, paragraphs: usize) -> Result<String> {
        let input = self.get_summary_input(video_id).await?;
        self.summarizer.summarize(&input, paragraphs).await
    }

    /// Fetch a transcript and build the fixed-count table of contents.
    ///
    /// A describer failure degrades to placeholder labels rather than
    /// failing the request.
    #[instrument(skip(self))]
    pub async fn get_toc(&self, video_id: &str) -> Result<Vec<TocEntry>> {
        let spans = self.fetch_with_deadline(video_id).await?;
        let segments = segment(&spans, self.settings.toc.segments);

        let labels = match self.describer.describe_segments(&segments).await {
            Ok(labels) => labels,
            Err(e) => {
                warn!(video_id, "describer failed, using placeholder labels: {}", e);
                vec![PLACEHOLDER_LABEL.to_string(); segments.len()]
            }
        };

        info!(video_id, entries = segments.len(), "built table of contents");

        Ok(segments
            .into_iter()
            .zip(labels)
            .map(|(seg, label)| TocEntry {
                anchor_seconds: seg.anchor_seconds,
                label,
            })
            .collect())
    }

    /// Run one fetch under the hard wall-clock deadline.
    ///
    /// A deadline breach drops the in-flight attempt (no further routes are
    /// tried) and surfaces as a timeout, never as a per-route skip.
    async fn fetch_with_deadline(&self, video_id: &str) -> Result<Vec<CaptionSpan>> {
        let chain = self.resolver.resolve();
        let deadline = Duration::from_secs(self.settings.fetch.deadline_seconds);

        let spans = tokio::time::timeout(deadline, self.fetcher.fetch(video_id, &chain))
            .await
            .map_err(|_| TekstError::DeadlineExceeded(self.settings.fetch.deadline_seconds))??;

        if spans.is_empty() {
            return Err(FetchError::provider("caption track is empty").into());
        }
        Ok(spans)
    }
}

/// Truncate transcript text to a character budget, appending a marker when
/// the budget is exceeded. Text at or under the budget is unchanged.
pub fn truncate_transcript(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str(TRUNCATION_MARKER);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::segmenter::Segment;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedProvider {
        response: Mutex<Option<std::result::Result<Vec<CaptionSpan>, FetchError>>>,
        delay: Option<Duration>,
    }

    impl FixedProvider {
        fn ok(spans: Vec<CaptionSpan>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(Ok(spans))),
                delay: None,
            })
        }

        fn err(e: FetchError) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(Err(e))),
                delay: None,
            })
        }

        fn slow(spans: Vec<CaptionSpan>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(Ok(spans))),
                delay: Some(delay),
            })
        }
    }

    #[async_trait]
    impl CaptionProvider for FixedProvider {
        async fn get_captions(
            &self,
            _video_id: &str,
            _languages: &[String],
            _route: &crate::proxy::Route,
        ) -> std::result::Result<Vec<CaptionSpan>, FetchError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("provider called more than once")
        }
    }

    struct FixedDescriber {
        labels: Option<Vec<String>>,
    }

    #[async_trait]
    impl Describer for FixedDescriber {
        async fn describe_segments(&self, segments: &[Segment]) -> Result<Vec<String>> {
            match &self.labels {
                Some(labels) => {
                    assert_eq!(labels.len(), segments.len());
                    Ok(labels.clone())
                }
                None => Err(TekstError::OpenAI("model unavailable".to_string())),
            }
        }
    }

    struct NoopSummarizer;

    #[async_trait]
    impl Summarizer for NoopSummarizer {
        async fn summarize(&self, transcript: &str, _paragraphs: usize) -> Result<String> {
            Ok(format!("summary of {} chars", transcript.chars().count()))
        }
    }

    fn test_settings() -> Settings {
        let mut settings = Settings::default();
        // pin the chain to a single known route so the environment and
        // home-directory proxy files can't leak into tests
        settings.proxy.override_routes = Some("http://test-route:1".to_string());
        settings
    }

    fn service(
        provider: Arc<dyn CaptionProvider>,
        describer: Arc<dyn Describer>,
    ) -> TranscriptService {
        TranscriptService::with_components(
            test_settings(),
            provider,
            describer,
            Arc::new(NoopSummarizer),
        )
    }

    fn spans() -> Vec<CaptionSpan> {
        vec![
            CaptionSpan::new(0.0, "a"),
            CaptionSpan::new(40.0, "b"),
            CaptionSpan::new(90.0, "c"),
        ]
    }

    #[tokio::test]
    async fn test_get_summary_input_flattens() {
        let svc = service(
            FixedProvider::ok(spans()),
            Arc::new(FixedDescriber { labels: None }),
        );
        assert_eq!(svc.get_summary_input("vid").await.unwrap(), "a b c");
    }

    #[tokio::test]
    async fn test_get_summary_input_truncates() {
        let long_text = "x".repeat(15_000);
        let svc = service(
            FixedProvider::ok(vec![CaptionSpan::new(0.0, long_text)]),
            Arc::new(FixedDescriber { labels: None }),
        );

        let input = svc.get_summary_input("vid").await.unwrap();
        assert_eq!(input.chars().count(), 12_000 + TRUNCATION_MARKER.chars().count());
        assert!(input.ends_with(TRUNCATION_MARKER));
        assert!(input.starts_with("xxx"));
    }

    #[tokio::test]
    async fn test_get_toc_labels_segments() {
        let labels: Vec<String> = (0..10).map(|i| format!("label {}", i)).collect();
        let svc = service(
            FixedProvider::ok(spans()),
            Arc::new(FixedDescriber {
                labels: Some(labels.clone()),
            }),
        );

        let entries = svc.get_toc("vid").await.unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].label, "label 0");
        assert_eq!(entries[0].anchor_seconds, 0.0);
        assert_eq!(entries[3].anchor_seconds, 36.0);
    }

    #[tokio::test]
    async fn test_get_toc_degrades_on_describer_failure() {
        let svc = service(
            FixedProvider::ok(spans()),
            Arc::new(FixedDescriber { labels: None }),
        );

        let entries = svc.get_toc("vid").await.unwrap();
        assert_eq!(entries.len(), 10);
        assert!(entries.iter().all(|e| e.label == PLACEHOLDER_LABEL));
    }

    #[tokio::test]
    async fn test_empty_caption_track_is_provider_failure() {
        let svc = service(
            FixedProvider::ok(Vec::new()),
            Arc::new(FixedDescriber { labels: None }),
        );

        match svc.get_toc("vid").await {
            Err(TekstError::Fetch(e)) => assert_eq!(e.kind, FailureKind::Provider),
            other => panic!("expected provider failure, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let svc = service(
            FixedProvider::err(FetchError::provider("captions disabled")),
            Arc::new(FixedDescriber { labels: None }),
        );

        match svc.get_summary_input("vid").await {
            Err(TekstError::Fetch(e)) => {
                assert_eq!(e.kind, FailureKind::Provider);
                assert_eq!(e.message, "captions disabled");
            }
            other => panic!("expected fetch error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let mut settings = test_settings();
        settings.fetch.deadline_seconds = 0;

        let svc = TranscriptService::with_components(
            settings,
            FixedProvider::slow(spans(), Duration::from_secs(5)),
            Arc::new(FixedDescriber { labels: None }),
            Arc::new(NoopSummarizer),
        );

        match svc.get_toc("vid").await {
            Err(TekstError::DeadlineExceeded(0)) => {}
            other => panic!("expected deadline error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_summarize_uses_truncated_input() {
        let svc = service(
            FixedProvider::ok(vec![CaptionSpan::new(0.0, "x".repeat(15_000))]),
            Arc::new(FixedDescriber { labels: None }),
        );

        let summary = svc.summarize("vid", 2).await.unwrap();
        let expected_len = 12_000 + TRUNCATION_MARKER.chars().count();
        assert_eq!(summary, format!("summary of {} chars", expected_len));
    }

    #[test]
    fn test_truncate_transcript_exact_boundary() {
        let text = "y".repeat(12_000);
        assert_eq!(truncate_transcript(&text, 12_000), text);

        let over = "y".repeat(12_001);
        let out = truncate_transcript(&over, 12_000);
        assert_eq!(out.chars().count(), 12_000 + TRUNCATION_MARKER.chars().count());
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.0), "1:05");
        assert_eq!(format_timestamp(615.9), "10:15");
        assert_eq!(format_timestamp(3665.0), "1:01:05");
    }

    #[test]
    fn test_toc_entry_rendering() {
        let entry = TocEntry {
            anchor_seconds: 84.7,
            label: "closing thoughts".to_string(),
        };
        assert_eq!(entry.display_line(), "1:24 — closing thoughts");
        // anchor floors into the link
        assert_eq!(entry.url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=84");
    }
}
