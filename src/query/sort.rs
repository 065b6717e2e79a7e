use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Listing;

/// Named ordering for a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    PriceAsc,
    PriceDesc,
    Newest,
    #[default]
    Featured,
}

impl SortStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "price-asc" => Some(SortStrategy::PriceAsc),
            "price-desc" => Some(SortStrategy::PriceDesc),
            "newest" => Some(SortStrategy::Newest),
            "featured" => Some(SortStrategy::Featured),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::PriceAsc => "price-asc",
            SortStrategy::PriceDesc => "price-desc",
            SortStrategy::Newest => "newest",
            SortStrategy::Featured => "featured",
        }
    }

    fn primary(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortStrategy::PriceAsc => a.price.total_cmp(&b.price),
            SortStrategy::PriceDesc => b.price.total_cmp(&a.price),
            SortStrategy::Newest => Ordering::Equal,
            SortStrategy::Featured => b.featured.cmp(&a.featured),
        }
    }

    /// Full ordering: primary key, then newest first, then source and id.
    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        self.primary(a, b)
            // None (undated) sorts below every timestamp, so it lands last.
            .then_with(|| b.listed_at.cmp(&a.listed_at))
            .then_with(|| a.source_collection.cmp(&b.source_collection))
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Sort a copy of `listings`; the input is left untouched.
pub fn sort(listings: &[Listing], strategy: SortStrategy) -> Vec<Listing> {
    let mut sorted = listings.to_vec();
    sorted.sort_by(|a, b| strategy.compare(a, b));
    sorted
}
