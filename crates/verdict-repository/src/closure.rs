//! Closure repository
//!
//! Wraps a caller-supplied function, for embedders whose documents come
//! from somewhere the stock repositories do not cover. Closure-backed
//! documents default to no plan caching, since the closure may answer
//! differently over time.

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::DecisionRepository;
use async_trait::async_trait;
use verdict_core::model::DecisionDocument;

type Loader = dyn Fn(&str) -> Option<DecisionDocument> + Send + Sync;

/// Function-backed document store
pub struct ClosureRepository {
    loader: Box<Loader>,
    cache_enabled: bool,
}

impl ClosureRepository {
    /// Wrap a loader function
    pub fn new(loader: impl Fn(&str) -> Option<DecisionDocument> + Send + Sync + 'static) -> Self {
        ClosureRepository {
            loader: Box::new(loader),
            cache_enabled: false,
        }
    }

    /// Allow the engine to cache plans compiled from this repository
    pub fn with_cache_enabled(mut self) -> Self {
        self.cache_enabled = true;
        self
    }
}

#[async_trait]
impl DecisionRepository for ClosureRepository {
    async fn load(&self, key: &str) -> RepositoryResult<DecisionDocument> {
        (self.loader)(key).ok_or_else(|| RepositoryError::NotFound {
            key: key.to_string(),
        })
    }

    fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }
}
