//! Mapping strategy contract consumed by response interceptors

use std::error::Error as StdError;

use crate::problem::ProblemDocument;

/// Turns an error raised by a handler into a problem document.
///
/// Implementations decide how a mapper is selected; callers only see the
/// resulting document.
pub trait MappingStrategy: Send + Sync {
    fn map(&self, error: &(dyn StdError + 'static)) -> ProblemDocument;
}
