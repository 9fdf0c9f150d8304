//! Filesystem repository
//!
//! Documents live as `.json` files under a root directory; the key is the
//! path relative to the root, with or without the extension. Keys that
//! would escape the root are rejected.

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::DecisionRepository;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use verdict_core::model::DecisionDocument;

/// Directory-backed document store
pub struct FileSystemRepository {
    root: PathBuf,
}

impl FileSystemRepository {
    /// Create a repository rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSystemRepository { root: root.into() }
    }

    fn resolve(&self, key: &str) -> RepositoryResult<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|component| {
            matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes {
            return Err(RepositoryError::InvalidKey {
                key: key.to_string(),
                message: "key must be a relative path inside the repository root".to_string(),
            });
        }

        let mut path = self.root.join(relative);
        if path.extension().is_none() {
            path.set_extension("json");
        }
        Ok(path)
    }
}

#[async_trait]
impl DecisionRepository for FileSystemRepository {
    async fn load(&self, key: &str) -> RepositoryResult<DecisionDocument> {
        let path = self.resolve(key)?;
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(key, path = %path.display(), "loaded decision document");
        Ok(DecisionDocument::from_json(&source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{"id": "demo", "name": "Demo",
        "nodes": {"in": {"id": "in", "name": "", "type": "inputNode"}},
        "edges": []}"#;

    #[tokio::test]
    async fn test_load_by_key_and_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("demo.json"), DOCUMENT).unwrap();

        let repo = FileSystemRepository::new(dir.path());
        assert_eq!(repo.load("demo").await.unwrap().id, "demo");
        assert_eq!(repo.load("demo.json").await.unwrap().id, "demo");
    }

    #[tokio::test]
    async fn test_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pricing")).unwrap();
        std::fs::write(dir.path().join("pricing/tiers.json"), DOCUMENT).unwrap();

        let repo = FileSystemRepository::new(dir.path());
        assert_eq!(repo.load("pricing/tiers").await.unwrap().id, "demo");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSystemRepository::new(dir.path());
        let err = repo.load("ghost").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_escaping_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSystemRepository::new(dir.path());
        let err = repo.load("../outside").await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidKey { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let repo = FileSystemRepository::new(dir.path());
        let err = repo.load("broken").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Json(_)));
    }
}
