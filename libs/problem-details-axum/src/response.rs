//! Classification of outgoing responses at the framework boundary

use axum::response::Response;
use http::header::CONTENT_TYPE;
use problem_details::{APPLICATION_PROBLEM_JSON, RenderedProblem};

use crate::error::HandlerError;

/// What a handler produced, as far as problem mapping is concerned.
#[derive(Debug)]
pub enum ResponseKind {
    /// The handler raised an error.
    Error(HandlerError),
    /// A regular response, identified by its status code.
    Status(Response),
}

impl ResponseKind {
    /// Split a raw response into an error or a status-bearing response.
    ///
    /// The error is taken out of the response extensions; the rest of the
    /// placeholder response is dropped.
    #[must_use]
    pub fn classify(mut response: Response) -> Self {
        match response.extensions_mut().remove::<HandlerError>() {
            Some(error) => Self::Error(error),
            None => Self::Status(response),
        }
    }
}

/// Check if a response carries a problem document rendered for its own status.
///
/// The `Content-Type` must be `application/problem+json` and the body must
/// come from a [`ProblemDocument`](problem_details::ProblemDocument) whose
/// status equals the response status.
#[must_use]
pub fn is_problem_response(response: &Response) -> bool {
    let rendered = response
        .extensions()
        .get::<RenderedProblem>()
        .is_some_and(|RenderedProblem(status)| *status == response.status());
    rendered
        && response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with(APPLICATION_PROBLEM_JSON))
}
