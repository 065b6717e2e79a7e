//! Listing aggregation and query engine.
//!
//! Gathers property documents from the canonical and agent-submitted
//! collections, normalizes them into one [`models::Listing`] shape and
//! answers filtered, sorted, paginated queries over the result.

pub mod aggregator;
pub mod config;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod pages;
pub mod preferences;
pub mod query;
pub mod sources;

pub use aggregator::{aggregate, ListingFeed, Snapshot};
pub use models::{Listing, RawRecord, SourceCollection};
pub use normalizer::normalize;
pub use pages::{browse, PageKind};
pub use preferences::{PreferencesStore, ViewPreferences};
pub use query::{run_query, ListingQuery, QueryParams, QueryResult};
