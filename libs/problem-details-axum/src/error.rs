//! Error value handlers return to request a mapped problem document

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// An error raised by a request handler.
///
/// Any `std::error::Error` converts into it, so handlers returning
/// `Result<T, HandlerError>` can use `?` directly. As a response it is a bare
/// 500 carrying the error in its extensions, where the problem details
/// interceptor picks it up and maps it.
#[derive(Clone)]
pub struct HandlerError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl HandlerError {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// The wrapped error, as seen by mappers.
    #[must_use]
    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        self.inner.as_ref()
    }

    #[must_use]
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.as_error().is::<E>()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.as_error().downcast_ref::<E>()
    }
}

impl<E> From<E> for HandlerError
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut resp = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        resp.extensions_mut().insert(self);
        resp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    fn write_block() -> Result<usize, DiskFull> {
        Err(DiskFull)
    }

    fn fallible() -> Result<usize, HandlerError> {
        let written = write_block()?;
        Ok(written)
    }

    #[test]
    fn question_mark_converts_errors() {
        let err = fallible().unwrap_err();
        assert!(err.is::<DiskFull>());
        assert!(err.downcast_ref::<DiskFull>().is_some());
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn response_carries_error_in_extensions() {
        let resp = HandlerError::new(DiskFull).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let carried = resp.extensions().get::<HandlerError>().unwrap();
        assert!(carried.is::<DiskFull>());
    }
}
