use listing_scout::models::{ListingStatus, PriceLabel};
use listing_scout::normalizer::PLACEHOLDER_IMAGE;
use listing_scout::{normalize, RawRecord, SourceCollection};
use serde_json::json;

fn submitted(value: serde_json::Value) -> RawRecord {
    RawRecord::from_value(SourceCollection::Submitted, value)
}

#[test]
fn agent_submission_shape_is_reconciled() {
    let raw = submitted(json!({
        "id": "sub-17",
        "name": "Sea view apartment",
        "price": "2,400,000",
        "neighborhood": "Palm Jumeirah",
        "beds": "3",
        "baths": 2,
        "size": "1850",
        "type": "Apartment",
        "features": "Sea View, Private Beach",
        "image": "https://cdn.test/sub-17.jpg",
        "agent_name": "Omar",
        "review_status": "published",
        "submittedAt": {"_seconds": 1717200000, "_nanoseconds": 0}
    }));

    let listing = normalize(&raw);
    assert_eq!(listing.id, "sub-17");
    assert_eq!(listing.title, "Sea view apartment");
    assert_eq!(listing.price, 2_400_000.0);
    assert_eq!(listing.area, "Palm Jumeirah");
    assert_eq!(listing.location, "Dubai");
    assert_eq!(listing.bedrooms, 3);
    assert_eq!(listing.bathrooms, 2);
    assert_eq!(listing.area_sqft, 1850.0);
    assert_eq!(listing.property_type, "Apartment");
    assert_eq!(listing.features, vec!["Sea View", "Private Beach"]);
    assert_eq!(listing.images, vec!["https://cdn.test/sub-17.jpg"]);
    assert_eq!(listing.agent_name.as_deref(), Some("Omar"));
    assert_eq!(listing.review_status.as_deref(), Some("published"));
    assert_eq!(listing.status, ListingStatus::Sale);
    assert_eq!(listing.price_label, PriceLabel::Total);
    assert!(listing.listed_at.is_some());
    assert_eq!(listing.source_collection, SourceCollection::Submitted);
}

#[test]
fn wrong_types_fall_back_to_defaults() {
    let raw = submitted(json!({
        "title": 42,
        "price": {"amount": 5},
        "bedrooms": [3],
        "images": "not-a-list",
        "location": ["x"],
        "featured": null
    }));
    let listing = normalize(&raw);
    assert_eq!(listing.title, "42");
    assert_eq!(listing.price, 0.0);
    assert_eq!(listing.bedrooms, 0);
    assert_eq!(listing.images, vec![PLACEHOLDER_IMAGE]);
    assert_eq!(listing.location, "Dubai");
    assert!(!listing.featured);
}

#[test]
fn listing_serializes_camel_case() {
    let listing = normalize(&submitted(json!({"id": "x", "videoUrl": "https://v.test"})));
    let value = serde_json::to_value(&listing).unwrap();
    assert_eq!(value["sourceCollection"], "submitted");
    assert_eq!(value["priceLabel"], "total");
    assert_eq!(value["videoUrl"], "https://v.test");
    assert_eq!(value["completionStatus"], "ready");
}
