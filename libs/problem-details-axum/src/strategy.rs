//! Mapping strategy backed by a mapper registry

use std::error::Error as StdError;
use std::sync::Arc;

use problem_details::{MapperRegistry, MappingStrategy, ProblemDocument};

/// Mapping strategy backed by a shared [`MapperRegistry`].
///
/// The interceptor only sees [`MappingStrategy`]; which mapper handles an
/// error is decided by the registry.
#[derive(Debug, Clone)]
pub struct RegistryMappingStrategy {
    registry: Arc<MapperRegistry>,
}

impl RegistryMappingStrategy {
    #[must_use]
    pub fn new(registry: Arc<MapperRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<MapperRegistry> {
        &self.registry
    }
}

impl MappingStrategy for RegistryMappingStrategy {
    fn map(&self, error: &(dyn StdError + 'static)) -> ProblemDocument {
        self.registry.get_mapper(error).map_error(error)
    }
}
