use crate::models::{RawRecord, SourceCollection};
use crate::sources::types::Predicate;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for every backing collection a listing can come from
/// New stores plug in here without touching aggregation or querying
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Read every document matching `predicate`, tagged with this connector's origin
    async fn fetch(&self, predicate: &Predicate) -> Result<Vec<RawRecord>>;

    /// Which canonical collection the records belong to
    fn collection(&self) -> SourceCollection;

    /// Name used in logs
    fn source_name(&self) -> &str;
}
