use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::store::{id_to_string, DocumentStore, StoreStatus, ID_FIELD, UNAVAILABLE_MESSAGE};

enum Mode {
    Available,
    Unavailable,
    Failing(String),
}

/// Process-local store with MongoDB-like semantics: generated ObjectIds,
/// exact-match filters, insertion order. Used by tests and local runs.
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    mode: Mode,
    name: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_mode(Mode::Available, Some("memory".to_string()))
    }

    /// A store that was never configured; every operation fails.
    pub fn unavailable() -> Self {
        Self::with_mode(Mode::Unavailable, None)
    }

    /// A connected store whose every operation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_mode(Mode::Failing(message.into()), Some("memory".to_string()))
    }

    fn with_mode(mode: Mode, name: Option<String>) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            mode,
            name,
        }
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check(&self) -> Result<(), AppError> {
        match &self.mode {
            Mode::Available => Ok(()),
            Mode::Unavailable => Err(AppError::store(UNAVAILABLE_MESSAGE)),
            Mode::Failing(message) => Err(AppError::store(message.clone())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn status(&self) -> StoreStatus {
        match self.mode {
            Mode::Unavailable => StoreStatus::Unavailable,
            Mode::Available | Mode::Failing(_) => StoreStatus::Connected,
        }
    }

    fn database_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, AppError> {
        self.check()?;

        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD, ObjectId::new());
        }
        let id = document
            .get(ID_FIELD)
            .map(id_to_string)
            .unwrap_or_default();

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        self.check()?;

        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        // Like MongoDB, a non-positive limit means "no limit".
        let limit = usize::try_from(limit)
            .ok()
            .filter(|l| *l > 0)
            .unwrap_or(usize::MAX);

        Ok(documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        self.check()?;
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }

    async fn close(&self) {}
}
