//! Proxy route resolution for caption fetching.
//!
//! YouTube rate-limits and geo-blocks caption requests aggressively, so a
//! fetch may need to go out through one of several egress routes. This
//! module only decides *which* routes to try and in what order; all network
//! I/O lives in [`crate::captions`].

use crate::config::{ProxySettings, Settings};
use std::path::PathBuf;
use tracing::debug;

/// One egress path for a caption request: a proxy URI, or a direct
/// connection. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    uri: Option<String>,
}

impl Route {
    /// A direct connection (no proxy).
    pub fn direct() -> Self {
        Self { uri: None }
    }

    /// A proxied connection through the given URI.
    pub fn proxy(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
        }
    }

    pub fn is_direct(&self) -> bool {
        self.uri.is_none()
    }

    /// The proxy URI, or `None` for a direct route.
    pub fn proxy_uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.uri {
            Some(uri) => write!(f, "{}", uri),
            None => write!(f, "direct"),
        }
    }
}

/// An ordered list of routes to try, first element first.
///
/// An empty chain is valid and means "direct connection only".
#[derive(Debug, Clone, Default)]
pub struct ProxyChain {
    routes: Vec<Route>,
}

impl ProxyChain {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the chain already contains a direct route, in which case the
    /// fetcher must not append its own direct fallback attempt.
    pub fn contains_direct(&self) -> bool {
        self.routes.iter().any(Route::is_direct)
    }
}

/// Resolves the proxy chain from its configured sources.
///
/// Precedence, first non-empty source wins:
/// 1. explicit override (config value or `YOUTUBE_PROXY` env), comma- or
///    newline-delimited;
/// 2. multi-line proxy list file, one URI per line;
/// 3. single-proxy fallback file;
/// 4. nothing — an empty chain, which is a legitimate "direct only" signal.
///
/// Pure parsing: no network calls, blank lines skipped, no error on empty.
pub struct ProxyChainResolver {
    override_routes: Option<String>,
    list_file: PathBuf,
    fallback_file: PathBuf,
}

/// Environment variable consulted as part of the explicit override source.
pub const PROXY_ENV_VAR: &str = "YOUTUBE_PROXY";

impl ProxyChainResolver {
    pub fn new(settings: &ProxySettings) -> Self {
        let override_routes = settings
            .override_routes
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| std::env::var(PROXY_ENV_VAR).ok().filter(|s| !s.trim().is_empty()));

        Self {
            override_routes,
            list_file: Settings::expand_path(&settings.list_file),
            fallback_file: Settings::expand_path(&settings.fallback_file),
        }
    }

    /// Build a resolver from explicit parts (used by tests and callers that
    /// manage their own configuration).
    pub fn from_parts(
        override_routes: Option<String>,
        list_file: PathBuf,
        fallback_file: PathBuf,
    ) -> Self {
        Self {
            override_routes,
            list_file,
            fallback_file,
        }
    }

    /// Resolve the ordered route chain.
    pub fn resolve(&self) -> ProxyChain {
        let sources: [fn(&Self) -> Option<Vec<Route>>; 3] = [
            Self::from_override,
            Self::from_list_file,
            Self::from_fallback_file,
        ];

        for source in sources {
            if let Some(routes) = source(self) {
                debug!(count = routes.len(), "resolved proxy chain");
                return ProxyChain::new(routes);
            }
        }

        debug!("no proxy sources populated, using direct connection only");
        ProxyChain::default()
    }

    fn from_override(&self) -> Option<Vec<Route>> {
        let raw = self.override_routes.as_deref()?;
        non_empty(parse_routes(&raw.replace(',', "\n")))
    }

    fn from_list_file(&self) -> Option<Vec<Route>> {
        let content = std::fs::read_to_string(&self.list_file).ok()?;
        non_empty(parse_routes(&content))
    }

    fn from_fallback_file(&self) -> Option<Vec<Route>> {
        let content = std::fs::read_to_string(&self.fallback_file).ok()?;
        let uri = content.trim();
        if uri.is_empty() {
            None
        } else {
            Some(vec![Route::proxy(uri)])
        }
    }
}

fn parse_routes(raw: &str) -> Vec<Route> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Route::proxy)
        .collect()
}

fn non_empty(routes: Vec<Route>) -> Option<Vec<Route>> {
    if routes.is_empty() {
        None
    } else {
        Some(routes)
    }
}
