use super::{new_document_id, Document, DocumentStore, Fields};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory storage for testing and development.
/// Does NOT persist data. Clones share the same contents.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document under a caller-chosen id, replacing any previous one.
    pub fn put(&self, collection: &str, document: Document) {
        let mut collections = self.lock();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => docs.push(document),
        }
    }

    pub fn count(&self, collection: &str) -> usize {
        self.lock().get(collection).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Document>>> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .lock()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self.lock().get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = new_document_id();
        self.put(collection, Document::new(id.clone(), fields));
        Ok(id)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::AcademyError;
    use serde_json::Value;

    /// A store whose every call fails, standing in for an unreachable database.
    #[derive(Default, Clone)]
    pub struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Document>> {
            Err(AcademyError::Store("connection refused".into()))
        }

        async fn list(&self, _collection: &str) -> Result<Vec<Document>> {
            Err(AcademyError::Store("connection refused".into()))
        }

        async fn insert(&self, _collection: &str, _fields: Fields) -> Result<String> {
            Err(AcademyError::Store("permission denied".into()))
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds a document from a JSON object literal.
        pub fn with_doc(self, collection: &str, id: &str, value: Value) -> Self {
            let fields = value.as_object().cloned().unwrap_or_default();
            self.store.put(collection, Document::new(id, fields));
            self
        }

        /// Adds `count` notices published one day apart, newest first in id order.
        pub fn with_notices(mut self, count: usize) -> Self {
            for i in 0..count {
                let day = 28 - (i % 28);
                let month = 6 - (i / 28);
                self = self.with_doc(
                    "notices",
                    &format!("notice-{:02}", i + 1),
                    serde_json::json!({
                        "title": format!("Notice {}", i + 1),
                        "content": format!("Details for notice {}", i + 1),
                        "category": if i % 2 == 0 { "exam" } else { "holiday" },
                        "publishDate": format!("2026-{:02}-{:02}", month, day),
                    }),
                );
            }
            self
        }
    }
}
