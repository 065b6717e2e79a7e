use listing_scout::config::{AppConfig, FixturesConfig};
use listing_scout::models::PriceLabel;
use listing_scout::{browse, ListingFeed, PageKind, QueryParams, SourceCollection, ViewPreferences};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

async fn feed() -> ListingFeed {
    let config = AppConfig {
        fixtures: FixturesConfig {
            primary_path: Some(fixture("properties.json")),
            submitted_path: Some(fixture("agent_submissions.json")),
        },
        ..AppConfig::default()
    };
    ListingFeed::new(config.build_connectors().await.unwrap())
}

#[tokio::test]
async fn sale_page_merges_both_collections() {
    let feed = feed().await;
    let result = browse(&feed, PageKind::Sale, &ViewPreferences::default(), &QueryParams::default(), 20)
        .await
        .unwrap();

    // pending submission is scoped out at the source
    assert_eq!(result.total, 3);
    // featured first, then newest
    let ids: Vec<&str> = result.items.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["prop-001", "sub-101", "prop-002"]);
    assert_eq!(result.items[1].source_collection, SourceCollection::Submitted);
    assert_eq!(result.items[1].area, "Jumeirah Village Circle");
}

#[tokio::test]
async fn rent_page_with_filters() {
    let feed = feed().await;
    let params = QueryParams::parse("furnished=false&hasVideo=true&sortBy=price-asc");
    let result = browse(&feed, PageKind::Rent, &ViewPreferences::default(), &params, 20)
        .await
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, "prop-003");
    assert_eq!(result.items[0].price_label, PriceLabel::Yearly);
}

#[tokio::test]
async fn preferred_area_narrows_commercial_page() {
    let feed = feed().await;
    let prefs = ViewPreferences {
        area: Some("business bay".to_string()),
        ..ViewPreferences::default()
    };
    let result = browse(&feed, PageKind::Commercial, &prefs, &QueryParams::default(), 20)
        .await
        .unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].subtype.as_deref(), Some("Fitted"));

    let elsewhere = browse(&feed, PageKind::Commercial, &prefs, &QueryParams::parse("area=Marina"), 20)
        .await
        .unwrap();
    assert_eq!(elsewhere.total, 0);
    assert_eq!(elsewhere.total_pages, 1);
}
