//! Error types for Tekst.

use thiserror::Error;

/// How a single caption-fetch attempt failed.
///
/// Classification happens once, at the provider-adapter boundary; the rest
/// of the crate only ever looks at this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The route itself was unusable: connection refused, proxy auth,
    /// timeout.
    Proxy,
    /// The provider answered but had nothing usable: captions disabled,
    /// missing, or region-blocked.
    Provider,
    /// Anything that fits neither bucket.
    Unknown,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Proxy => write!(f, "proxy"),
            FailureKind::Provider => write!(f, "provider"),
            FailureKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A classified caption-fetch failure.
///
/// When every route in a chain fails, the fetcher surfaces the *last*
/// failure; earlier ones are diagnostic-only (logged, not returned).
#[derive(Debug, Clone, Error)]
#[error("caption fetch failed ({kind}): {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn proxy(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Proxy, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Provider, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unknown, message)
    }

    /// True when the failure means "this video has no usable captions"
    /// rather than "we could not reach the provider at all".
    pub fn is_no_captions(&self) -> bool {
        self.kind == FailureKind::Provider
    }
}

/// Library-level error type for Tekst operations.
#[derive(Error, Debug)]
pub enum TekstError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Caption fetch timed out after {0} seconds")]
    DeadlineExceeded(u64),

    #[error("Describer failed: {0}")]
    Describer(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Tekst operations.
pub type Result<T> = std::result::Result<T, TekstError>;
