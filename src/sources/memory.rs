use crate::models::{RawRecord, SourceCollection};
use crate::sources::document_store::documents_from_payload;
use crate::sources::traits::SourceConnector;
use crate::sources::types::Predicate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Connector over documents held in memory
///
/// Used for fixture files and tests. Predicates are evaluated locally with
/// the same semantics the document store applies.
pub struct MemoryConnector {
    name: String,
    collection: SourceCollection,
    documents: Vec<Value>,
    scope: Predicate,
}

impl MemoryConnector {
    pub fn new(name: impl Into<String>, collection: SourceCollection, documents: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            collection,
            documents,
            scope: Predicate::new(),
        }
    }

    /// Load documents from a JSON file holding an array or `{"documents": [...]}`
    pub async fn from_json_file(path: &Path, collection: SourceCollection) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading fixture documents from {}", path.display()))?;
        let payload: Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing fixture documents in {}", path.display()))?;
        let documents = documents_from_payload(payload);

        info!(path = %path.display(), count = documents.len(), "Loaded fixture documents");

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(collection.as_str())
            .to_string();
        Ok(Self::new(name, collection, documents))
    }

    /// Constraints added to every read
    pub fn with_scope(mut self, scope: Predicate) -> Self {
        self.scope = scope;
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl SourceConnector for MemoryConnector {
    async fn fetch(&self, predicate: &Predicate) -> Result<Vec<RawRecord>> {
        let predicate = predicate.clone().and(&self.scope);
        let records: Vec<RawRecord> = self
            .documents
            .iter()
            .cloned()
            .map(|doc| RawRecord::from_value(self.collection, doc))
            .filter(|record| predicate.matches(record))
            .collect();

        debug!(source = %self.name, matched = records.len(), total = self.documents.len(), "Filtered in-memory documents");
        Ok(records)
    }

    fn collection(&self) -> SourceCollection {
        self.collection
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
