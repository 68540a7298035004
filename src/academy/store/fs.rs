use super::{new_document_id, Document, DocumentStore, Fields};
use crate::error::{AcademyError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const COLLECTIONS_DIR: &str = "collections";

type CollectionMap = BTreeMap<String, Fields>;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a document under a chosen id, replacing any document already there.
    pub async fn put(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut docs = self.load_collection(collection).await?;
        docs.insert(id.to_string(), fields);
        self.save_collection(collection, &docs).await
    }

    fn collections_dir(&self) -> PathBuf {
        self.root.join(COLLECTIONS_DIR)
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        if collection.is_empty()
            || !collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AcademyError::Store(format!(
                "Invalid collection name: {:?}",
                collection
            )));
        }
        Ok(self.collections_dir().join(format!("{}.json", collection)))
    }

    async fn load_collection(&self, collection: &str) -> Result<CollectionMap> {
        let path = self.collection_path(collection)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CollectionMap::new()),
            Err(e) => Err(AcademyError::Io(e)),
        }
    }

    async fn save_collection(&self, collection: &str, docs: &CollectionMap) -> Result<()> {
        let path = self.collection_path(collection)?;
        tokio::fs::create_dir_all(self.collections_dir()).await?;
        let content = serde_json::to_string_pretty(docs)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let docs = self.load_collection(collection).await?;
        Ok(docs
            .get(id)
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let docs = self.load_collection(collection).await?;
        debug!(collection, count = docs.len(), "loaded collection");
        Ok(docs
            .into_iter()
            .map(|(id, fields)| Document::new(id, fields))
            .collect())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        let mut docs = self.load_collection(collection).await?;
        let id = new_document_id();
        docs.insert(id.clone(), fields);
        self.save_collection(collection, &docs).await?;
        debug!(collection, %id, "inserted document");
        Ok(id)
    }
}
