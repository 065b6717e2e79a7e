pub mod raw;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use raw::RawRecord;

/// Collection a listing was read from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceCollection {
    Primary,
    Submitted,
}

impl SourceCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCollection::Primary => "primary",
            SourceCollection::Submitted => "submitted",
        }
    }
}

/// Whether the property is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Sale,
    Rent,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Sale => "sale",
            ListingStatus::Rent => "rent",
        }
    }
}

/// How the price should be labelled when rendered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceLabel {
    Yearly,
    Total,
}

/// Canonical property listing
///
/// Built fresh from a [`RawRecord`] on every aggregation pass. Every field
/// carries a defined value; optional data is an explicit `Option`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub source_collection: SourceCollection,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub price_label: PriceLabel,
    pub location: String,
    pub area: String,
    pub city: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqft: f64,
    pub property_type: String,
    pub category: Option<String>,
    pub subtype: Option<String>,
    pub developer: Option<String>,
    pub featured: bool,
    pub furnished: Option<bool>,
    pub parking: Option<String>,
    pub property_age: Option<String>,
    pub status: ListingStatus,
    pub completion_status: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub video_url: Option<String>,
    pub agent_name: Option<String>,
    pub review_status: Option<String>,
    pub listed_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn has_video(&self) -> bool {
        self.video_url.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}
