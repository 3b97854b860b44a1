//! Pre-response plugin rewriting error responses into problem documents

use std::fmt;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use problem_details::{ErrorStatusCodes, MappingStrategy, StatusCodeErrorMapper};

use crate::response::{ResponseKind, is_problem_response};

/// Name and version the plugin registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Options supplied when registering the plugin.
#[derive(Clone)]
pub struct ProblemDetailsOptions {
    strategy: Arc<dyn MappingStrategy>,
    error_status_codes: ErrorStatusCodes,
    preserve_problem_responses: bool,
}

impl ProblemDetailsOptions {
    /// Options with the default error status set, preserving problem responses.
    #[must_use]
    pub fn new(strategy: Arc<dyn MappingStrategy>) -> Self {
        Self {
            strategy,
            error_status_codes: ErrorStatusCodes::default(),
            preserve_problem_responses: true,
        }
    }

    #[must_use]
    pub fn with_error_status_codes(mut self, codes: ErrorStatusCodes) -> Self {
        self.error_status_codes = codes;
        self
    }

    /// Whether responses already rendered from a problem document with a
    /// matching status pass through untouched.
    #[must_use]
    pub fn preserve_problem_responses(mut self, preserve: bool) -> Self {
        self.preserve_problem_responses = preserve;
        self
    }

    #[must_use]
    pub fn error_status_codes(&self) -> &ErrorStatusCodes {
        &self.error_status_codes
    }
}

impl fmt::Debug for ProblemDetailsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemDetailsOptions")
            .field("error_status_codes", &self.error_status_codes)
            .field(
                "preserve_problem_responses",
                &self.preserve_problem_responses,
            )
            .finish_non_exhaustive()
    }
}

/// Per-response decision: mapped error, status-derived problem, or pass-through.
///
/// Holds no per-request state; one instance serves every request of the
/// router it is registered on.
#[derive(Debug)]
pub struct Interceptor {
    options: ProblemDetailsOptions,
}

impl Interceptor {
    #[must_use]
    pub fn new(options: ProblemDetailsOptions) -> Self {
        Self { options }
    }

    /// Rewrite `response` if it represents an error, otherwise return it as is.
    #[must_use]
    pub fn handle(&self, response: Response) -> Response {
        match ResponseKind::classify(response) {
            ResponseKind::Error(error) => {
                self.options.strategy.map(error.as_error()).into_response()
            }
            ResponseKind::Status(response) if self.maps_status(&response) => {
                StatusCodeErrorMapper::map_status_code(response.status()).into_response()
            }
            ResponseKind::Status(response) => response,
        }
    }

    fn maps_status(&self, response: &Response) -> bool {
        if !self.options.error_status_codes.contains(response.status()) {
            return false;
        }
        !(self.options.preserve_problem_responses && is_problem_response(response))
    }
}

/// Pre-response hook: runs the rest of the stack, then hands the response to
/// the [`Interceptor`].
pub async fn on_pre_response(
    State(interceptor): State<Arc<Interceptor>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    interceptor.handle(response)
}

/// Problem details plugin for axum routers.
///
/// ```ignore
/// let mut registry = MapperRegistry::new();
/// registry.register_fn(|e: &UserNotFound| USER_NOT_FOUND.as_problem(e.to_string()));
/// let strategy = Arc::new(RegistryMappingStrategy::new(Arc::new(registry)));
///
/// let app = ProblemDetailsPlugin::register(
///     Router::new().route("/users/{id}", get(get_user)),
///     ProblemDetailsOptions::new(strategy),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemDetailsPlugin;

impl ProblemDetailsPlugin {
    pub const NAME: &'static str = "axum-http-problem-details";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    #[must_use]
    pub fn info() -> PluginInfo {
        PluginInfo {
            name: Self::NAME,
            version: Self::VERSION,
        }
    }

    /// Attach the pre-response hook to every route of `router`.
    ///
    /// Only routes added before this call are covered, as with any axum layer.
    pub fn register<S>(router: Router<S>, options: ProblemDetailsOptions) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let interceptor = Arc::new(Interceptor::new(options));
        router.layer(middleware::from_fn_with_state(
            interceptor,
            on_pre_response,
        ))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{HandlerError, RegistryMappingStrategy};
    use http::{StatusCode, header::CONTENT_TYPE};
    use problem_details::{APPLICATION_PROBLEM_JSON, MapperRegistry, ProblemDocument};
    use std::error::Error as StdError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    /// Strategy counting invocations, always answering 503.
    #[derive(Default)]
    struct CountingStrategy {
        calls: AtomicUsize,
    }

    impl MappingStrategy for CountingStrategy {
        fn map(&self, _error: &(dyn StdError + 'static)) -> ProblemDocument {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ProblemDocument::new(StatusCode::SERVICE_UNAVAILABLE)
        }
    }

    fn content_type(resp: &Response) -> &str {
        resp.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    fn registry_interceptor() -> Interceptor {
        let strategy = RegistryMappingStrategy::new(Arc::new(MapperRegistry::new()));
        Interceptor::new(ProblemDetailsOptions::new(Arc::new(strategy)))
    }

    #[test]
    fn plugin_declares_name_and_version() {
        let info = ProblemDetailsPlugin::info();
        assert_eq!(info.name, "axum-http-problem-details");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn error_uses_mapped_status() {
        let strategy = Arc::new(CountingStrategy::default());
        let interceptor = Interceptor::new(ProblemDetailsOptions::new(strategy.clone()));

        let resp = interceptor.handle(HandlerError::new(Boom).into_response());

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn error_status_skips_strategy() {
        let strategy = Arc::new(CountingStrategy::default());
        let interceptor = Interceptor::new(ProblemDetailsOptions::new(strategy.clone()));

        let resp = interceptor.handle(StatusCode::NOT_FOUND.into_response());

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn success_passes_through_untouched() {
        let interceptor = registry_interceptor();
        let mut original = (StatusCode::OK, "hello").into_response();
        original
            .headers_mut()
            .insert("x-marker", http::HeaderValue::from_static("kept"));

        let resp = interceptor.handle(original);

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-marker"].to_str().unwrap(), "kept");
        assert_eq!(content_type(&resp), "text/plain; charset=utf-8");
    }

    #[test]
    fn status_outside_configured_set_passes_through() {
        let strategy = Arc::new(CountingStrategy::default());
        let codes = problem_details::ErrorStatusCodes::from_codes([500]).unwrap();
        let interceptor = Interceptor::new(
            ProblemDetailsOptions::new(strategy).with_error_status_codes(codes),
        );

        let resp = interceptor.handle((StatusCode::NOT_FOUND, "plain").into_response());

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&resp), "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn existing_problem_response_is_preserved() {
        let interceptor = registry_interceptor();
        let doc = ProblemDocument::new(StatusCode::CONFLICT)
            .with_extension("balance", 30)
            .unwrap();

        let resp = interceptor.handle(doc.into_response());

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["balance"], 30);
    }

    #[tokio::test]
    async fn existing_problem_response_is_rewritten_when_not_preserved() {
        let strategy = RegistryMappingStrategy::new(Arc::new(MapperRegistry::new()));
        let interceptor = Interceptor::new(
            ProblemDetailsOptions::new(Arc::new(strategy)).preserve_problem_responses(false),
        );
        let doc = ProblemDocument::new(StatusCode::CONFLICT)
            .with_extension("balance", 30)
            .unwrap();

        let resp = interceptor.handle(doc.into_response());

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"type": "about:blank", "status": 409}));
    }
}
