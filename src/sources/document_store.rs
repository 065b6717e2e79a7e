use crate::models::{RawRecord, SourceCollection};
use crate::sources::traits::SourceConnector;
use crate::sources::types::Predicate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Connector for one collection of the HTTP document store
pub struct DocumentStoreConnector {
    client: Client,
    base_url: String,
    collection_name: String,
    collection: SourceCollection,
    api_key: Option<String>,
    scope: Predicate,
}

impl DocumentStoreConnector {
    /// Create a connector reading `collection_name` from the store at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        collection_name: impl Into<String>,
        collection: SourceCollection,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection_name: collection_name.into(),
            collection,
            api_key: None,
            scope: Predicate::new(),
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Constraints added to every read, e.g. only published submissions
    pub fn with_scope(mut self, scope: Predicate) -> Self {
        self.scope = scope;
        self
    }

    fn query_url(&self) -> String {
        format!("{}/collections/{}/query", self.base_url, self.collection_name)
    }
}

#[async_trait]
impl SourceConnector for DocumentStoreConnector {
    async fn fetch(&self, predicate: &Predicate) -> Result<Vec<RawRecord>> {
        let predicate = predicate.clone().and(&self.scope);
        let url = self.query_url();

        debug!(url = %url, constraints = predicate.constraints.len(), "Querying document store");

        let mut request = self
            .client
            .post(&url)
            .json(&json!({ "where": predicate.constraints }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to query collection {}", self.collection_name))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to query collection {}: {}",
                self.collection_name,
                response.status()
            );
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to decode document store response")?;

        let records: Vec<RawRecord> = documents_from_payload(payload)
            .into_iter()
            .map(|doc| RawRecord::from_value(self.collection, doc))
            .collect();

        debug!(collection = %self.collection_name, count = records.len(), "Documents received");
        Ok(records)
    }

    fn collection(&self) -> SourceCollection {
        self.collection
    }

    fn source_name(&self) -> &str {
        &self.collection_name
    }
}

/// Flatten a store payload into plain documents.
///
/// Accepts a bare array or `{"documents": [...]}`. A document shaped as
/// `{"id": .., "data": {..}}` is flattened with its id merged into the data.
pub(crate) fn documents_from_payload(payload: Value) -> Vec<Value> {
    let docs = match payload {
        Value::Array(docs) => docs,
        Value::Object(mut map) => match map.remove("documents") {
            Some(Value::Array(docs)) => docs,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    docs.into_iter().map(flatten_document).collect()
}

fn flatten_document(doc: Value) -> Value {
    let Value::Object(mut map) = doc else {
        return doc;
    };
    match map.remove("data") {
        Some(Value::Object(mut data)) => {
            if let Some(id) = map.remove("id") {
                data.entry("id").or_insert(id);
            }
            Value::Object(data)
        }
        Some(other) => {
            map.insert("data".to_string(), other);
            Value::Object(map)
        }
        None => Value::Object(map),
    }
}
