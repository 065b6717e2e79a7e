//! Filter, sort and paginate over an already fetched snapshot.
//!
//! Everything here is synchronous and works on borrowed slices; the snapshot
//! is never mutated.

pub mod criteria;
pub mod filter;
pub mod paginate;
pub mod sort;

use serde::Serialize;
use tracing::debug;

use crate::models::Listing;

pub use criteria::{Action, FilterCriteria, ListingQuery, QueryParams, Range, ViewMode};
pub use filter::filter;
pub use paginate::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use sort::{sort, SortStrategy};

/// What the rendering layer receives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub items: Vec<Listing>,
    /// Matches across all pages
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub view: ViewMode,
}

/// Filter, then sort, then slice out the requested page.
pub fn run_query(snapshot: &[Listing], query: &ListingQuery) -> QueryResult {
    let filtered = filter(snapshot, &query.criteria);
    let sorted = sort(&filtered, query.sort);
    let page = paginate(&sorted, query.page, query.page_size);

    debug!(
        snapshot = snapshot.len(),
        matched = sorted.len(),
        page = page.page,
        sort = query.sort.as_str(),
        "Query evaluated"
    );

    QueryResult {
        items: page.items,
        total: sorted.len(),
        total_pages: page.total_pages,
        page: page.page,
        view: query.view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRecord, SourceCollection};
    use crate::normalizer::normalize;
    use serde_json::json;

    #[test]
    fn empty_snapshot_is_one_empty_page() {
        let result = run_query(&[], &ListingQuery::default());
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.page, 1);
    }

    #[test]
    fn pipeline_filters_sorts_and_pages() {
        let snapshot: Vec<Listing> = (0..30)
            .map(|i| {
                normalize(&RawRecord::from_value(
                    SourceCollection::Primary,
                    json!({"id": format!("p{i:02}"), "price": i * 1000, "status": if i % 2 == 0 { "sale" } else { "rent" }}),
                ))
            })
            .collect();

        let params = QueryParams::parse("action=buy&sortBy=price-desc&page=1");
        let result = run_query(&snapshot, &ListingQuery::from_params(&params, 10));
        assert_eq!(result.total, 15);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.items.len(), 10);
        assert_eq!(result.items[0].id, "p28");
    }
}
