//! Fixed-count segmentation of caption spans.
//!
//! Buckets a caption stream into `k` contiguous time windows and derives a
//! representative anchor timestamp per window, for building a clickable
//! table of contents. Pure and deterministic: identical spans and `k`
//! always produce identical output.

use crate::captions::CaptionSpan;
use serde::{Deserialize, Serialize};

/// Padding added past the last span's start time, compensating for the
/// final caption's unknown display duration.
const END_PADDING_SECONDS: f64 = 30.0;

/// Text used for a window that contains no spans.
pub const NO_SPEECH: &str = "(no speech)";

/// One of `k` contiguous windows, with the timestamp its TOC entry will
/// link to and the space-joined text of the spans that start inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Anchor timestamp in seconds.
    pub anchor_seconds: f64,
    /// Space-joined span text, or [`NO_SPEECH`].
    pub text: String,
}

impl Segment {
    pub fn is_empty_window(&self) -> bool {
        self.text == NO_SPEECH
    }
}

/// Bucket `spans` into exactly `k` contiguous windows.
///
/// Windows cover `[0, last_start + 30)` with no gaps or overlaps; a span
/// belongs to the one half-open window its start time falls in and is never
/// split. Empty input yields an empty result (no window fabrication), any
/// non-empty input yields exactly `k` segments.
///
/// Anchors: a window with spans anchors at its lower bound. A window
/// without spans anchors at the midpoint of its bounds — except that when
/// earlier windows exist, its lower bound is first pulled back to the
/// previous window's anchor, so the empty entry never links ahead of
/// content the prior entry already covers.
pub fn segment(spans: &[CaptionSpan], k: usize) -> Vec<Segment> {
    if spans.is_empty() || k == 0 {
        return Vec::new();
    }

    let duration = spans[spans.len() - 1].start_seconds + END_PADDING_SECONDS;
    let window = (duration / k as f64).max(1.0);

    let mut segments: Vec<Segment> = Vec::with_capacity(k);
    for i in 0..k {
        let mut lower = i as f64 * window;
        let upper = (i + 1) as f64 * window;

        let texts: Vec<&str> = spans
            .iter()
            .filter(|s| s.start_seconds >= lower && s.start_seconds < upper)
            .map(|s| s.text.as_str())
            .collect();

        if texts.is_empty() {
            if let Some(prev) = segments.last() {
                lower = prev.anchor_seconds;
            }
        }

        let (anchor, text) = if texts.is_empty() {
            ((lower + upper) / 2.0, NO_SPEECH.to_string())
        } else {
            (lower, texts.join(" "))
        };

        segments.push(Segment {
            anchor_seconds: anchor,
            text,
        });
    }

    segments
}
