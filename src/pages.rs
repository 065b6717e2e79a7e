use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::ListingFeed;
use crate::normalizer::NormalizeOptions;
use crate::preferences::ViewPreferences;
use crate::query::{run_query, ListingQuery, QueryParams, QueryResult};
use crate::sources::Predicate;

/// The listing pages of the site, each a fixed slice of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Sale,
    Rent,
    Commercial,
}

impl PageKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sale" | "buy" => Some(PageKind::Sale),
            "rent" => Some(PageKind::Rent),
            "commercial" => Some(PageKind::Commercial),
            _ => None,
        }
    }

    /// Constraints pushed down to every source for this page
    pub fn predicate(&self) -> Predicate {
        match self {
            PageKind::Sale => Predicate::new().equals("status", "sale"),
            PageKind::Rent => Predicate::new().equals("status", "rent"),
            PageKind::Commercial => Predicate::new().equals("category", "commercial"),
        }
    }

    pub fn normalize_options(&self, prefs: &ViewPreferences) -> NormalizeOptions {
        NormalizeOptions {
            force_yearly_label: *self == PageKind::Rent,
            default_currency: prefs.currency.clone(),
        }
    }
}

/// Refresh the feed for `page` and evaluate the query against the new snapshot.
///
/// Returns `None` if another refresh superseded this one.
pub async fn browse(
    feed: &ListingFeed,
    page: PageKind,
    prefs: &ViewPreferences,
    params: &QueryParams,
    page_size: usize,
) -> Option<QueryResult> {
    let snapshot = feed
        .refresh(&page.predicate(), &page.normalize_options(prefs))
        .await?;

    let mut query = ListingQuery::from_params(params, page_size);
    prefs.apply_to(&mut query);

    let result = run_query(&snapshot.listings, &query);
    info!(
        page = ?page,
        generation = snapshot.generation,
        total = result.total,
        "Listing page ready"
    );
    Some(result)
}
