//! # Storage Layer
//!
//! The document database is an external collaborator. This module defines the narrow
//! interface the rest of the crate needs from it, [`DocumentStore`], and two backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per collection
//!   - `<root>/collections/<collection>.json` holds an object mapping document id to fields
//!   - A missing file reads as an empty collection
//!
//! - [`memory::InMemoryStore`]: in-memory storage for tests
//!   - No persistence
//!   - Shares its contents across clones so tests can inspect writes
//!
//! ## Storage Format
//!
//! ```text
//! site-data/
//! ├── config.json              # SiteConfig (see config.rs)
//! └── collections/
//!     ├── config.json          # siteSettings document
//!     ├── pages.json           # home / about / contact content documents
//!     ├── notices.json
//!     └── ...                  # one file per collection
//! ```
//!
//! Stores do no querying. Filtering, ordering and limiting happen in the data access
//! facade (`api.rs`) so every backend behaves identically.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// Field map of a stored document.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// An untyped record as held by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }
}

/// Abstract interface over the hosted document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by collection and id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Fetch every document in a collection, in store order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Append a document and return its newly assigned id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String>;
}

/// Generates an id for a new document.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
