//! Caption acquisition for Tekst.
//!
//! Provides the caption span data model, the provider trait implemented by
//! the YouTube adapter, and the multi-route fetcher that walks a
//! [`ProxyChain`](crate::proxy::ProxyChain).

mod fetcher;
mod youtube;

pub use fetcher::CaptionFetcher;
pub use youtube::{extract_video_id, YoutubeCaptions};

use crate::error::FetchError;
use crate::proxy::Route;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One provider-furnished unit of spoken text with a start time.
///
/// Providers emit spans in non-decreasing `start_seconds` order; downstream
/// code relies on that ordering but tolerates violations (the segmenter
/// groups by start time only, so an out-of-order span lands in whichever
/// window its start time selects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSpan {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Caption text.
    pub text: String,
}

impl CaptionSpan {
    pub fn new(start_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            text: text.into(),
        }
    }
}

/// Flatten spans into a single space-joined transcript string.
///
/// Order-preserving: the output is `spans[0].text + " " + spans[1].text`
/// and so on.
pub fn flatten(spans: &[CaptionSpan]) -> String {
    spans
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trait for caption track providers.
///
/// An implementation performs exactly one retrieval attempt per call,
/// through the given route (direct or exactly one proxy), and maps its raw
/// transport/provider errors into the [`FetchError`] taxonomy once, so the
/// rest of the crate never inspects raw error types.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Fetch the caption track for a video.
    ///
    /// `languages` is a preference order; the first available language
    /// track wins.
    async fn get_captions(
        &self,
        video_id: &str,
        languages: &[String],
        route: &Route,
    ) -> std::result::Result<Vec<CaptionSpan>, FetchError>;
}
