//! Concurrent gathering of listings from every source connector.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{Listing, RawRecord};
use crate::normalizer::{normalize_with, NormalizeOptions};
use crate::sources::{Predicate, SourceConnector};

/// Fetch from one connector, degrading any failure to an empty result.
async fn fetch_or_empty(connector: &dyn SourceConnector, predicate: &Predicate) -> Vec<RawRecord> {
    match connector.fetch(predicate).await {
        Ok(mut records) => {
            let origin = connector.collection();
            for record in &mut records {
                record.origin = origin;
            }
            records
        }
        Err(e) => {
            warn!(error = ?e, source = connector.source_name(), "Source unavailable, continuing without it");
            Vec::new()
        }
    }
}

/// Run every connector concurrently and concatenate their records in connector order.
pub async fn gather(connectors: &[Arc<dyn SourceConnector>], predicate: &Predicate) -> Vec<RawRecord> {
    let fetches = connectors
        .iter()
        .map(|connector| fetch_or_empty(connector.as_ref(), predicate));

    join_all(fetches).await.into_iter().flatten().collect()
}

/// Gather and normalize with default options.
pub async fn aggregate(connectors: &[Arc<dyn SourceConnector>], predicate: &Predicate) -> Vec<Listing> {
    aggregate_with(connectors, predicate, &NormalizeOptions::default()).await
}

pub async fn aggregate_with(
    connectors: &[Arc<dyn SourceConnector>],
    predicate: &Predicate,
    opts: &NormalizeOptions,
) -> Vec<Listing> {
    let records = gather(connectors, predicate).await;
    let listings: Vec<Listing> = records.iter().map(|raw| normalize_with(raw, opts)).collect();

    info!(
        sources = connectors.len(),
        listings = listings.len(),
        "Aggregation complete"
    );
    listings
}

/// Result of one aggregation pass
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub listings: Vec<Listing>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            generation: 0,
            listings: Vec::new(),
            fetched_at: None,
        }
    }
}

/// Holds the latest snapshot and publishes it to subscribers
///
/// Each refresh takes a generation ticket before fetching. A refresh whose
/// ticket has been superseded by the time its fetch completes is dropped, so
/// a slow stale request can never overwrite a newer snapshot.
pub struct ListingFeed {
    connectors: Vec<Arc<dyn SourceConnector>>,
    generation: AtomicU64,
    snapshot_tx: watch::Sender<Arc<Snapshot>>,
}

impl ListingFeed {
    pub fn new(connectors: Vec<Arc<dyn SourceConnector>>) -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(Snapshot::empty()));
        Self {
            connectors,
            generation: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Aggregate afresh. Returns `None` when a newer refresh started meanwhile.
    pub async fn refresh(&self, predicate: &Predicate, opts: &NormalizeOptions) -> Option<Arc<Snapshot>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let listings = aggregate_with(&self.connectors, predicate, opts).await;

        let snapshot = Arc::new(Snapshot {
            generation: ticket,
            listings,
            fetched_at: Some(Utc::now()),
        });

        let published = self.snapshot_tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *current = snapshot.clone();
            true
        });

        if published {
            Some(snapshot)
        } else {
            debug!(ticket, latest = self.generation.load(Ordering::SeqCst), "Discarding superseded aggregation");
            None
        }
    }
}
