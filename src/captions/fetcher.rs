//! Multi-route caption fetching with classified fallback.

use super::{CaptionProvider, CaptionSpan};
use crate::error::FetchError;
use crate::proxy::{ProxyChain, Route};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches a caption track by walking an ordered proxy chain.
///
/// One provider attempt per route, strictly sequential, returning on the
/// first success. Every failed route is logged and the next one is tried
/// regardless of failure class — even a provider-side failure is retried
/// through later routes, since a different egress IP may be unblocked.
/// After the chain is exhausted a single direct attempt is made, unless the
/// chain already contained a direct route. Total attempts are therefore
/// bounded by `chain.len() + 1`.
pub struct CaptionFetcher {
    provider: Arc<dyn CaptionProvider>,
    languages: Vec<String>,
}

impl CaptionFetcher {
    pub fn new(provider: Arc<dyn CaptionProvider>, languages: Vec<String>) -> Self {
        Self {
            provider,
            languages,
        }
    }

    /// Fetch raw caption spans for a video.
    ///
    /// On total failure the error carries the *last* attempt's kind and
    /// message; earlier per-route failures are logged only.
    pub async fn fetch(
        &self,
        video_id: &str,
        chain: &ProxyChain,
    ) -> std::result::Result<Vec<CaptionSpan>, FetchError> {
        let mut last_error: Option<FetchError> = None;

        for route in chain.routes() {
            match self.attempt(video_id, route).await {
                Ok(spans) => return Ok(spans),
                Err(e) => {
                    warn!(
                        video_id,
                        route = %route,
                        kind = %e.kind,
                        "caption fetch attempt failed: {}",
                        e.message
                    );
                    last_error = Some(e);
                }
            }
        }

        if !chain.contains_direct() {
            match self.attempt(video_id, &Route::direct()).await {
                Ok(spans) => return Ok(spans),
                Err(e) => {
                    warn!(
                        video_id,
                        kind = %e.kind,
                        "direct caption fetch failed: {}",
                        e.message
                    );
                    last_error = Some(e);
                }
            }
        }

        // last_error is always set here: either the chain was non-empty or
        // the direct attempt above ran.
        Err(last_error
            .unwrap_or_else(|| FetchError::unknown("no fetch attempts were made")))
    }

    async fn attempt(
        &self,
        video_id: &str,
        route: &Route,
    ) -> std::result::Result<Vec<CaptionSpan>, FetchError> {
        debug!(video_id, route = %route, "attempting caption fetch");
        self.provider
            .get_captions(video_id, &self.languages, route)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted provider: pops one pre-arranged response per attempt and
    /// records which route each attempt used.
    struct ScriptedProvider {
        responses: Mutex<Vec<std::result::Result<Vec<CaptionSpan>, FetchError>>>,
        attempts: Mutex<Vec<Route>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<std::result::Result<Vec<CaptionSpan>, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempt_count(&self) -> usize {
            self.attempts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CaptionProvider for ScriptedProvider {
        async fn get_captions(
            &self,
            _video_id: &str,
            _languages: &[String],
            route: &Route,
        ) -> std::result::Result<Vec<CaptionSpan>, FetchError> {
            self.attempts.lock().unwrap().push(route.clone());
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                panic!("provider called more times than scripted");
            }
            responses.remove(0)
        }
    }

    fn fetcher(provider: Arc<ScriptedProvider>) -> CaptionFetcher {
        CaptionFetcher::new(provider, vec!["ru".to_string(), "en".to_string()])
    }

    fn spans() -> Vec<CaptionSpan> {
        vec![CaptionSpan::new(0.0, "hi")]
    }

    #[tokio::test]
    async fn test_empty_chain_direct_failure_is_one_attempt() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(FetchError::provider(
            "captions disabled",
        ))]));
        let err = fetcher(provider.clone())
            .fetch("vid", &ProxyChain::default())
            .await
            .unwrap_err();

        assert_eq!(provider.attempt_count(), 1);
        assert_eq!(err.kind, FailureKind::Provider);
        assert_eq!(err.message, "captions disabled");
    }

    #[tokio::test]
    async fn test_second_route_succeeds_after_proxy_failure() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(FetchError::proxy("connection refused")),
            Ok(spans()),
        ]));
        let chain = ProxyChain::new(vec![
            Route::proxy("http://a:1"),
            Route::proxy("http://b:2"),
        ]);

        let result = fetcher(provider.clone()).fetch("vid", &chain).await.unwrap();

        assert_eq!(result, spans());
        assert_eq!(provider.attempt_count(), 2);
        assert_eq!(
            provider.attempts.lock().unwrap().as_slice(),
            &[Route::proxy("http://a:1"), Route::proxy("http://b:2")]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_still_tries_later_routes() {
        // A region block on one egress IP may not apply to another.
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(FetchError::provider("region blocked")),
            Ok(spans()),
        ]));
        let chain = ProxyChain::new(vec![
            Route::proxy("http://a:1"),
            Route::proxy("http://b:2"),
        ]);

        let result = fetcher(provider.clone()).fetch("vid", &chain).await.unwrap();
        assert_eq!(result, spans());
        assert_eq!(provider.attempt_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_chain_attempts_direct_and_surfaces_last_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(FetchError::proxy("timeout")),
            Err(FetchError::proxy("refused")),
            Err(FetchError::provider("no track")),
        ]));
        let chain = ProxyChain::new(vec![
            Route::proxy("http://a:1"),
            Route::proxy("http://b:2"),
        ]);

        let err = fetcher(provider.clone()).fetch("vid", &chain).await.unwrap_err();

        // chain.len() + 1 attempts, last of them direct
        assert_eq!(provider.attempt_count(), 3);
        assert!(provider.attempts.lock().unwrap().last().unwrap().is_direct());
        // the terminal error is the final failure's, not the first's
        assert_eq!(err.kind, FailureKind::Provider);
        assert_eq!(err.message, "no track");
    }

    #[tokio::test]
    async fn test_direct_route_in_chain_is_not_retried() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(FetchError::proxy("refused")),
            Err(FetchError::provider("no track")),
        ]));
        let chain = ProxyChain::new(vec![Route::proxy("http://a:1"), Route::direct()]);

        let err = fetcher(provider.clone()).fetch("vid", &chain).await.unwrap_err();

        // No extra direct fallback beyond the one already in the chain.
        assert_eq!(provider.attempt_count(), 2);
        assert_eq!(err.kind, FailureKind::Provider);
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(spans())]));
        let chain = ProxyChain::new(vec![
            Route::proxy("http://a:1"),
            Route::proxy("http://b:2"),
        ]);

        let result = fetcher(provider.clone()).fetch("vid", &chain).await.unwrap();
        assert_eq!(result, spans());
        assert_eq!(provider.attempt_count(), 1);
    }
}
