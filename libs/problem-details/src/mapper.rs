//! Mappers turning errors and status codes into problem documents

use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

use http::StatusCode;

use crate::problem::ProblemDocument;

/// Converts an error into a problem document.
pub trait ErrorMapper: Send + Sync {
    fn map_error(&self, error: &(dyn StdError + 'static)) -> ProblemDocument;
}

/// Catch-all mapper: every error becomes an `about:blank` 500 document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorMapper;

impl ErrorMapper for DefaultErrorMapper {
    fn map_error(&self, _error: &(dyn StdError + 'static)) -> ProblemDocument {
        ProblemDocument::new(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Derives a problem document from a bare status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCodeErrorMapper;

impl StatusCodeErrorMapper {
    pub fn map_status_code(status: StatusCode) -> ProblemDocument {
        ProblemDocument::new(status)
    }
}

/// Adapts a closure over a concrete error type to [`ErrorMapper`].
///
/// Errors of any other type go through [`DefaultErrorMapper`].
pub struct FnMapper<E, F> {
    f: F,
    _error: PhantomData<fn(&E)>,
}

impl<E, F> FnMapper<E, F>
where
    E: StdError + 'static,
    F: Fn(&E) -> ProblemDocument + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _error: PhantomData,
        }
    }
}

impl<E, F> ErrorMapper for FnMapper<E, F>
where
    E: StdError + 'static,
    F: Fn(&E) -> ProblemDocument + Send + Sync,
{
    fn map_error(&self, error: &(dyn StdError + 'static)) -> ProblemDocument {
        match error.downcast_ref::<E>() {
            Some(typed) => (self.f)(typed),
            None => DefaultErrorMapper.map_error(error),
        }
    }
}

impl<E, F> fmt::Debug for FnMapper<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMapper")
            .field("error", &std::any::type_name::<E>())
            .finish_non_exhaustive()
    }
}
