//! In-memory repository
//!
//! Key -> document map behind an async lock, suitable for tests and for
//! embedding callers that assemble documents programmatically.

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::DecisionRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use verdict_core::model::DecisionDocument;

/// In-memory document store
#[derive(Default)]
pub struct InMemoryRepository {
    documents: RwLock<HashMap<String, DecisionDocument>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with documents
    pub fn with_documents(
        documents: impl IntoIterator<Item = (String, DecisionDocument)>,
    ) -> Self {
        InMemoryRepository {
            documents: RwLock::new(documents.into_iter().collect()),
        }
    }

    /// Register a document under a key, replacing any previous entry
    pub async fn insert(&self, key: impl Into<String>, document: DecisionDocument) {
        self.documents.write().await.insert(key.into(), document);
    }

    /// Register a document from its JSON source
    pub async fn insert_json(
        &self,
        key: impl Into<String>,
        source: &str,
    ) -> RepositoryResult<()> {
        let document = DecisionDocument::from_json(source)?;
        self.insert(key, document).await;
        Ok(())
    }
}

#[async_trait]
impl DecisionRepository for InMemoryRepository {
    async fn load(&self, key: &str) -> RepositoryResult<DecisionDocument> {
        self.documents
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                key: key.to_string(),
            })
    }
}
