//! # Data Access Facade
//!
//! The single entry point through which page controllers and forms reach the document
//! store. Controllers never see a [`DocumentStore`] directly.
//!
//! ## Two Tiers
//!
//! - **Contract operations** never fail: [`DataAccess::get_document`] yields `None`,
//!   [`DataAccess::get_documents`] yields an empty vector and [`DataAccess::add_document`]
//!   yields [`AddOutcome::Failed`]. The swallowed error is logged.
//! - **`fetch_*` operations** return [`Result`] so a controller can tell a failed load
//!   from an empty collection and move to the matching state.
//!
//! Typed variants decode documents into [`Record<T>`] here, at the boundary. A document
//! that does not fit its record shape is skipped with a warning; the rest still load.
//!
//! ## Generic Over DocumentStore
//!
//! `DataAccess<S: DocumentStore>` is generic over the backend:
//! - Production: `DataAccess<FileStore>`
//! - Testing: `DataAccess<InMemoryStore>` or `DataAccess<FailingStore>`

use crate::error::Result;
use crate::model::Record;
use crate::query::Query;
use crate::store::{Document, DocumentStore, Fields};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

/// Result of a write through the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created { id: String },
    Failed { error: String },
}

impl AddOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AddOutcome::Created { .. })
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            AddOutcome::Created { id } => Some(id),
            AddOutcome::Failed { .. } => None,
        }
    }
}

pub struct DataAccess<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> DataAccess<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn fetch_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.store.get(collection, id).await
    }

    pub async fn fetch_documents(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        let docs = self.store.list(collection).await?;
        let total = docs.len();
        let matched = query.apply(docs);
        debug!(collection, total, matched = matched.len(), "queried collection");
        Ok(matched)
    }

    /// Fetches one document, or `None` when it is missing or the store fails.
    pub async fn get_document(&self, collection: &str, id: &str) -> Option<Document> {
        match self.fetch_document(collection, id).await {
            Ok(doc) => doc,
            Err(e) => {
                error!(collection, id, error = %e, "failed to fetch document");
                None
            }
        }
    }

    /// Fetches the documents matching `query`; empty when nothing matches or the store fails.
    pub async fn get_documents(&self, collection: &str, query: &Query) -> Vec<Document> {
        match self.fetch_documents(collection, query).await {
            Ok(docs) => docs,
            Err(e) => {
                error!(collection, error = %e, "failed to fetch documents");
                Vec::new()
            }
        }
    }

    /// Appends a document. Store failures come back as [`AddOutcome::Failed`].
    pub async fn add_document(&self, collection: &str, data: Fields) -> AddOutcome {
        match self.store.insert(collection, data).await {
            Ok(id) => {
                debug!(collection, %id, "added document");
                AddOutcome::Created { id }
            }
            Err(e) => {
                error!(collection, error = %e, "failed to add document");
                AddOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Typed single-document fetch. A document of the wrong shape reads as absent.
    pub async fn fetch_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Record<T>>> {
        let Some(doc) = self.fetch_document(collection, id).await? else {
            return Ok(None);
        };
        match Record::decode(collection, doc) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(error = %e, "skipping undecodable document");
                Ok(None)
            }
        }
    }

    /// Typed query. Documents of the wrong shape are skipped.
    pub async fn fetch_records<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Record<T>>> {
        let docs = self.fetch_documents(collection, query).await?;
        Ok(decode_all(collection, docs))
    }

    pub async fn get_record<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Option<Record<T>> {
        match self.fetch_record(collection, id).await {
            Ok(record) => record,
            Err(e) => {
                error!(collection, id, error = %e, "failed to fetch document");
                None
            }
        }
    }

    pub async fn get_records<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Vec<Record<T>> {
        decode_all(collection, self.get_documents(collection, query).await)
    }
}

fn decode_all<T: DeserializeOwned>(collection: &str, docs: Vec<Document>) -> Vec<Record<T>> {
    docs.into_iter()
        .filter_map(|doc| match Record::decode(collection, doc) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping undecodable document");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Notice, SiteSettings};
    use crate::query::{Direction, Op};
    use crate::store::memory::fixtures::{FailingStore, StoreFixture};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let api = DataAccess::new(StoreFixture::new().store);
        assert!(api.get_document("pages", "home").await.is_none());
    }

    #[tokio::test]
    async fn store_failures_become_contract_values() {
        let api = DataAccess::new(FailingStore);
        assert!(api.get_document("pages", "home").await.is_none());
        assert!(api.get_documents("notices", &Query::new()).await.is_empty());
        assert!(api
            .get_records::<Notice>("notices", &Query::new())
            .await
            .is_empty());

        let outcome = api.add_document("contactMessages", Fields::new()).await;
        assert!(!outcome.is_success());
        assert!(outcome.id().is_none());
    }

    #[tokio::test]
    async fn fetch_variants_surface_the_error() {
        let api = DataAccess::new(FailingStore);
        assert!(api.fetch_documents("notices", &Query::new()).await.is_err());
        assert!(api.fetch_record::<SiteSettings>("config", "siteSettings").await.is_err());
    }

    #[tokio::test]
    async fn written_record_reads_back_intact() {
        let api = DataAccess::new(StoreFixture::new().store);
        let outcome = api
            .add_document(
                "testimonials",
                fields(json!({"name": "Ravi", "content": "Great teachers", "rating": 4})),
            )
            .await;
        let id = outcome.id().unwrap().to_string();

        let docs = api.get_documents("testimonials", &Query::new()).await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].field("name"), Some(&json!("Ravi")));
        assert_eq!(docs[0].field("content"), Some(&json!("Great teachers")));
        assert_eq!(docs[0].field("rating"), Some(&json!(4)));
    }

    #[tokio::test]
    async fn typed_query_skips_undecodable_documents() {
        let store = StoreFixture::new()
            .with_doc("notices", "good", json!({"title": "Fees due", "publishDate": "2026-02-01"}))
            .with_doc("notices", "bad", json!({"title": 42}))
            .store;
        let api = DataAccess::new(store);

        let notices: Vec<Record<Notice>> = api
            .fetch_records(
                "notices",
                &Query::new().order_by("publishDate", Direction::Desc),
            )
            .await
            .unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, "good");
    }

    #[tokio::test]
    async fn query_is_applied_by_the_facade() {
        let api = DataAccess::new(StoreFixture::new().with_notices(15).store);
        let docs = api
            .get_documents(
                "notices",
                &Query::new()
                    .filter("category", Op::Eq, "exam")
                    .order_by("publishDate", Direction::Asc)
                    .limit(3),
            )
            .await;
        assert_eq!(docs.len(), 3);
        assert!(docs.iter().all(|d| d.field("category") == Some(&json!("exam"))));
        assert_eq!(docs[0].id, "notice-15");
    }
}
