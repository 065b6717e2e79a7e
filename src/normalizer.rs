//! Raw record to canonical [`Listing`] conversion.
//!
//! Every rule is a fallback chain: the first field that yields a usable
//! value wins, and the chain always ends in a default. Normalization never
//! fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::models::{Listing, ListingStatus, PriceLabel, RawRecord};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_CURRENCY: &str = "AED";
pub const DEFAULT_LOCATION: &str = "Dubai";
pub const DEFAULT_COMPLETION: &str = "ready";
pub const DEFAULT_PROPERTY_TYPE: &str = "Property";

/// Inline "No Image" rendering used when a record carries no image at all.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%20width%3D%22400%22%20height%3D%22300%22%3E%3Crect%20width%3D%22400%22%20height%3D%22300%22%20fill%3D%22%23e5e7eb%22%2F%3E%3Ctext%20x%3D%22200%22%20y%3D%22150%22%20font-family%3D%22sans-serif%22%20font-size%3D%2224%22%20fill%3D%22%236b7280%22%20text-anchor%3D%22middle%22%3ENo%20Image%3C%2Ftext%3E%3C%2Fsvg%3E";

/// Per-page adjustments applied while normalizing
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Label every price as yearly regardless of status (rent-only pages)
    pub force_yearly_label: bool,
    /// Currency for records that do not state one
    pub default_currency: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            force_yearly_label: false,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Normalize with default options.
pub fn normalize(raw: &RawRecord) -> Listing {
    normalize_with(raw, &NormalizeOptions::default())
}

pub fn normalize_with(raw: &RawRecord, opts: &NormalizeOptions) -> Listing {
    let status = resolve_status(raw);
    let price_label = if opts.force_yearly_label || status == ListingStatus::Rent {
        PriceLabel::Yearly
    } else {
        PriceLabel::Total
    };

    Listing {
        id: raw.first_text(&["id", "_id"]).unwrap_or_else(|| "unknown".to_string()),
        source_collection: raw.origin,
        title: raw
            .first_text(&["title", "name"])
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: raw.text("description").unwrap_or_default(),
        price: raw.get("price").and_then(coerce_number).unwrap_or(0.0).max(0.0),
        currency: raw
            .text("currency")
            .unwrap_or_else(|| opts.default_currency.clone()),
        price_label,
        location: raw
            .first_text(&["location", "address", "area", "city"])
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        area: raw
            .first_text(&["area", "location", "address", "neighborhood", "district"])
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        city: raw
            .text("city")
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        bedrooms: count_field(raw, &["bedrooms", "beds"]),
        bathrooms: count_field(raw, &["bathrooms", "baths"]),
        area_sqft: raw
            .first_map(&["areaSqft", "area_sqft", "sqft", "size"], |v| {
                coerce_number(v).filter(|n| *n >= 0.0)
            })
            .unwrap_or(0.0),
        property_type: raw
            .first_text(&["propertyType", "property_type", "type"])
            .unwrap_or_else(|| DEFAULT_PROPERTY_TYPE.to_string()),
        category: raw.text("category"),
        subtype: raw.first_text(&["subtype", "subType"]),
        developer: raw.text("developer"),
        featured: raw.get("featured").is_some_and(is_truthy),
        furnished: raw.get("furnished").map(coerce_furnished),
        parking: raw.text("parking"),
        property_age: raw.first_text(&["propertyAge", "property_age"]),
        status,
        completion_status: raw
            .first_text(&["completion", "property_status", "completionStatus"])
            .unwrap_or_else(|| DEFAULT_COMPLETION.to_string()),
        features: resolve_features(raw),
        images: resolve_images(raw),
        video_url: raw.first_text(&["videoUrl", "video_url", "video"]),
        agent_name: raw.first_text(&["agentName", "agent_name", "agent"]),
        review_status: raw.first_text(&["reviewStatus", "review_status"]),
        listed_at: raw
            .first_map(
                &["submittedAt", "submitted_at", "createdAt", "created_at"],
                coerce_timestamp,
            ),
    }
}

fn resolve_status(raw: &RawRecord) -> ListingStatus {
    match raw.text("status").map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("rent" | "rental" | "for rent" | "for-rent") => ListingStatus::Rent,
        _ => ListingStatus::Sale,
    }
}

fn resolve_features(raw: &RawRecord) -> Vec<String> {
    match raw.get("features") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn resolve_images(raw: &RawRecord) -> Vec<String> {
    if let Some(Value::Array(items)) = raw.get("images") {
        let images: Vec<String> = items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
            .collect();
        if !images.is_empty() {
            return images;
        }
    }

    let single = raw
        .first_text(&["image", "image_url", "imageUrl"])
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    vec![single]
}

fn count_field(raw: &RawRecord, keys: &[&str]) -> u32 {
    raw.first_map(keys, |v| coerce_number(v).filter(|n| *n >= 0.0))
        .map(|n| n.trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Number from a JSON number or a numeric string ("1,250,000" included).
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "no" | "0" | "off"
        ),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_furnished(value: &Value) -> bool {
    match value {
        Value::String(s) if s.trim().eq_ignore_ascii_case("unfurnished") => false,
        other => is_truthy(other),
    }
}

fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let raw = n.as_f64()?;
            // Anything past year ~5138 in seconds is assumed to be milliseconds.
            if raw.abs() >= 1e11 {
                DateTime::from_timestamp_millis(raw as i64)
            } else {
                DateTime::from_timestamp(raw as i64, 0)
            }
        }
        Value::Object(map) => {
            let secs = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(secs, nanos.min(999_999_999) as u32)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
