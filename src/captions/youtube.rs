//! YouTube caption provider.
//!
//! Retrieves a caption track the same way the browser does: fetch the watch
//! page, pull the `captionTracks` list out of the embedded player response,
//! pick a track by language preference, then download and parse the
//! timedtext XML. Each call goes through exactly one route (direct or one
//! proxy), and all raw transport/provider errors are mapped into the
//! [`FetchError`] taxonomy here, at the adapter boundary.

use super::{CaptionProvider, CaptionSpan};
use crate::error::FetchError;
use crate::proxy::Route;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout. Kept well under the orchestration deadline so a
/// dead proxy cannot eat the whole fetch budget on its own.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 12;

/// Without a browser-like user agent YouTube serves a page variant that
/// does not embed the player response.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Extract a YouTube video ID from a URL or bare 11-character ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    static VIDEO_ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = VIDEO_ID_RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    });

    let caps = re.captures(input.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// One entry of the player response's `captionTracks` array.
#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
}

/// YouTube caption track provider.
pub struct YoutubeCaptions {
    request_timeout: Duration,
}

impl YoutubeCaptions {
    pub fn new() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_request_timeout(timeout: Duration) -> Self {
        Self {
            request_timeout: timeout,
        }
    }

    /// Build an HTTP client for one route.
    fn client_for(&self, route: &Route) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(USER_AGENT);

        if let Some(uri) = route.proxy_uri() {
            let proxy = reqwest::Proxy::all(uri)
                .map_err(|e| FetchError::proxy(format!("invalid proxy URI {}: {}", uri, e)))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| FetchError::unknown(format!("failed to build HTTP client: {}", e)))
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        url: &str,
    ) -> Result<String, FetchError> {
        let response = client.get(url).send().await.map_err(classify_transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(FetchError::provider(format!(
                "request blocked (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(FetchError::unknown(format!(
                "unexpected HTTP status {}",
                status.as_u16()
            )));
        }

        response.text().await.map_err(classify_transport)
    }
}

impl Default for YoutubeCaptions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionProvider for YoutubeCaptions {
    async fn get_captions(
        &self,
        video_id: &str,
        languages: &[String],
        route: &Route,
    ) -> Result<Vec<CaptionSpan>, FetchError> {
        let client = self.client_for(route)?;

        let watch_url = format!("https://www.youtube.com/watch?v={}&hl=en", video_id);
        let page = self.fetch_page(&client, &watch_url).await?;

        if page.contains("class=\"g-recaptcha\"") {
            return Err(FetchError::provider(
                "request blocked by captcha (too many requests from this IP)",
            ));
        }

        let tracks_json = extract_json_array(&page, "\"captionTracks\":").ok_or_else(|| {
            FetchError::provider("captions are disabled or unavailable for this video")
        })?;

        let tracks: Vec<CaptionTrack> = serde_json::from_str(tracks_json)
            .map_err(|e| FetchError::unknown(format!("malformed caption track list: {}", e)))?;

        let track = pick_track(&tracks, languages).ok_or_else(|| {
            FetchError::provider(format!(
                "no caption track for languages [{}]",
                languages.join(", ")
            ))
        })?;

        debug!(video_id, language = %track.language_code, "downloading caption track");

        let xml = self.fetch_page(&client, &track.base_url).await?;
        Ok(parse_timedtext(&xml))
    }
}

/// Map a raw reqwest error to the failure taxonomy.
fn classify_transport(e: reqwest::Error) -> FetchError {
    if e.is_timeout() || e.is_connect() {
        FetchError::proxy(format!("route unusable: {}", e))
    } else {
        FetchError::unknown(e.to_string())
    }
}

/// Pick the first track matching the language preference order. No match
/// means no captions in any acceptable language, not a silent fallback to
/// an arbitrary track.
fn pick_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        tracks
            .iter()
            .find(|t| t.language_code == *lang || t.language_code.starts_with(&format!("{}-", lang)))
    })
}

/// Extract the JSON array that follows `key` in `page`, honoring nested
/// brackets and string literals.
fn extract_json_array<'a>(page: &'a str, key: &str) -> Option<&'a str> {
    let start = page.find(key)? + key.len();
    let rest = &page[start..];
    if !rest.starts_with('[') {
        return None;
    }

    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a timedtext XML document into caption spans.
///
/// The format is flat: `<text start="12.3" dur="4.5">words</text>` nodes
/// in playback order.
fn parse_timedtext(xml: &str) -> Vec<CaptionSpan> {
    static TEXT_RE: OnceLock<Regex> = OnceLock::new();
    let re = TEXT_RE.get_or_init(|| {
        Regex::new(r#"(?s)<text start="([0-9.]+)"[^>]*>(.*?)</text>"#).expect("Invalid regex")
    });

    re.captures_iter(xml)
        .filter_map(|caps| {
            let start = caps.get(1)?.as_str().parse::<f64>().ok()?;
            let text = unescape_entities(caps.get(2)?.as_str());
            Some(CaptionSpan::new(start, text))
        })
        .collect()
}

/// Decode the XML entities YouTube emits in caption text.
fn unescape_entities(text: &str) -> String {
    static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();
    let re = NUMERIC_RE.get_or_init(|| Regex::new(r"&#(\d+);").expect("Invalid regex"));

    let decoded = re.replace_all(text, |caps: &regex::Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    decoded
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
