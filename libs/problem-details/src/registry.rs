//! Registry resolving an error to the mapper registered for its type

use std::any::TypeId;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::mapper::{DefaultErrorMapper, ErrorMapper, FnMapper};
use crate::problem::ProblemDocument;

struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    matches: fn(&(dyn StdError + 'static)) -> bool,
    mapper: Arc<dyn ErrorMapper>,
}

fn is_type<E: StdError + 'static>(error: &(dyn StdError + 'static)) -> bool {
    error.is::<E>()
}

/// Maps concrete error types to mappers, with a fallback that always resolves.
///
/// Build it once at startup, then share it behind an `Arc`. Lookups never
/// mutate the registry.
pub struct MapperRegistry {
    entries: Vec<Entry>,
    fallback: Arc<dyn ErrorMapper>,
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MapperRegistry {
    /// Empty registry falling back to [`DefaultErrorMapper`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: Arc::new(DefaultErrorMapper),
        }
    }

    /// Replace the fallback used for errors without a registered mapper.
    #[must_use]
    pub fn with_fallback(mut self, mapper: impl ErrorMapper + 'static) -> Self {
        self.fallback = Arc::new(mapper);
        self
    }

    /// Register `mapper` for errors of type `E`, replacing any previous one.
    pub fn register<E>(&mut self, mapper: impl ErrorMapper + 'static) -> &mut Self
    where
        E: StdError + 'static,
    {
        let type_id = TypeId::of::<E>();
        let type_name = std::any::type_name::<E>();
        let mapper: Arc<dyn ErrorMapper> = Arc::new(mapper);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.type_id == type_id) {
            tracing::debug!(error_type = type_name, "replacing problem mapper");
            entry.mapper = mapper;
        } else {
            tracing::debug!(error_type = type_name, "registering problem mapper");
            self.entries.push(Entry {
                type_id,
                type_name,
                matches: is_type::<E>,
                mapper,
            });
        }
        self
    }

    /// Register a closure over `E` as its mapper.
    pub fn register_fn<E, F>(&mut self, f: F) -> &mut Self
    where
        E: StdError + 'static,
        F: Fn(&E) -> ProblemDocument + Send + Sync + 'static,
    {
        self.register::<E>(FnMapper::new(f))
    }

    /// Remove the mapper for `E`. Returns whether one was registered.
    pub fn unregister<E>(&mut self) -> bool
    where
        E: StdError + 'static,
    {
        let type_id = TypeId::of::<E>();
        let before = self.entries.len();
        self.entries.retain(|e| e.type_id != type_id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn contains<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        let type_id = TypeId::of::<E>();
        self.entries.iter().any(|e| e.type_id == type_id)
    }

    /// Resolve the mapper for `error`; the fallback when none is registered.
    #[must_use]
    pub fn get_mapper(&self, error: &(dyn StdError + 'static)) -> &dyn ErrorMapper {
        self.entries
            .iter()
            .find(|e| (e.matches)(error))
            .map_or(self.fallback.as_ref(), |e| e.mapper.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperRegistry")
            .field(
                "mappers",
                &self.entries.iter().map(|e| e.type_name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
