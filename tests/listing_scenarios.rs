use anyhow::Result;
use async_trait::async_trait;
use listing_scout::query::{filter, paginate, sort, FilterCriteria, Range, SortStrategy};
use listing_scout::sources::{MemoryConnector, Predicate, SourceConnector};
use listing_scout::{aggregate, run_query, ListingQuery, QueryParams, RawRecord, SourceCollection};
use serde_json::json;
use std::sync::Arc;

struct DownConnector(SourceCollection);

#[async_trait]
impl SourceConnector for DownConnector {
    async fn fetch(&self, _predicate: &Predicate) -> Result<Vec<RawRecord>> {
        anyhow::bail!("missing index")
    }

    fn collection(&self) -> SourceCollection {
        self.0
    }

    fn source_name(&self) -> &str {
        "down"
    }
}

fn sale_connectors() -> Vec<Arc<dyn SourceConnector>> {
    vec![
        Arc::new(MemoryConnector::new(
            "properties",
            SourceCollection::Primary,
            vec![
                json!({"id": "p1", "price": 500000, "status": "sale"}),
                json!({"id": "p2", "price": 1200000, "status": "sale"}),
            ],
        )),
        Arc::new(MemoryConnector::new(
            "agent_submissions",
            SourceCollection::Submitted,
            vec![json!({"id": "s1", "price": "800000", "status": "sale"})],
        )),
    ]
}

#[tokio::test]
async fn buy_then_price_window() {
    let listings = aggregate(&sale_connectors(), &Predicate::new()).await;
    assert_eq!(listings.len(), 3);

    let mut criteria = FilterCriteria::from_params(&QueryParams::parse("action=buy"));
    assert_eq!(filter(&listings, &criteria).len(), 3);

    criteria.price = Range {
        min: Some(600000.0),
        max: Some(1000000.0),
    };
    let remaining = filter(&listings, &criteria);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "s1");
    assert_eq!(remaining[0].source_collection, SourceCollection::Submitted);
    assert_eq!(remaining[0].price, 800000.0);
}

#[tokio::test]
async fn both_sources_down_gives_single_empty_page() {
    let connectors: Vec<Arc<dyn SourceConnector>> = vec![
        Arc::new(DownConnector(SourceCollection::Primary)),
        Arc::new(DownConnector(SourceCollection::Submitted)),
    ];
    let listings = aggregate(&connectors, &Predicate::new()).await;
    assert!(listings.is_empty());

    let filtered = filter(&listings, &FilterCriteria::default());
    let sorted = sort(&filtered, SortStrategy::Featured);
    let page = paginate(&sorted, 1, 20);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn pages_reassemble_sorted_result() {
    let docs = (0..45)
        .map(|i| json!({"id": format!("l{i}"), "price": (i * 7919) % 1000, "featured": i % 5 == 0}))
        .collect();
    let connectors: Vec<Arc<dyn SourceConnector>> = vec![Arc::new(MemoryConnector::new(
        "properties",
        SourceCollection::Primary,
        docs,
    ))];
    let listings = aggregate(&connectors, &Predicate::new()).await;

    let sorted = sort(&listings, SortStrategy::PriceAsc);
    let first = run_query(&listings, &ListingQuery::from_params(&QueryParams::parse("sortBy=price-asc"), 20));
    assert_eq!(first.total_pages, 3);

    let mut stitched = Vec::new();
    for page in 1..=first.total_pages as i64 {
        let params = QueryParams::parse(&format!("sortBy=price-asc&page={page}"));
        stitched.extend(run_query(&listings, &ListingQuery::from_params(&params, 20)).items);
    }
    assert_eq!(stitched, sorted);
}
