use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::models::ListingStatus;
use crate::query::sort::SortStrategy;

/// Raw query parameters as handed over by the UI layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parse a `key=value&key=value` string, form-urlencoded.
    pub fn parse(query: &str) -> Self {
        let pairs = form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).into_owned();
        Self::from_pairs(pairs)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Trimmed, non-empty value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key)
            .and_then(|v| v.replace(',', "").parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }

    fn count(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.parse::<u32>().ok())
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)?.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "furnished" => Some(true),
            "false" | "0" | "no" | "unfurnished" => Some(false),
            _ => None,
        }
    }
}

/// Buy or rent, as chosen on the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Rent,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buy" | "sale" => Some(Action::Buy),
            "rent" => Some(Action::Rent),
            _ => None,
        }
    }

    pub fn status(&self) -> ListingStatus {
        match self {
            Action::Buy => ListingStatus::Sale,
            Action::Rent => ListingStatus::Rent,
        }
    }
}

/// Result layout requested by the UI; does not affect the result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Map,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            "map" => Some(ViewMode::Map),
            _ => None,
        }
    }
}

/// Inclusive numeric range, either bound optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Conjunctive filter criteria. `None` / empty means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub action: Option<Action>,
    pub category: Option<String>,
    pub property_type: Option<String>,
    pub subtype: Option<String>,
    pub area: Option<String>,
    pub developer: Option<String>,
    pub price: Range,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub sqft: Range,
    pub furnished: Option<bool>,
    pub parking: Option<String>,
    pub property_age: Option<String>,
    pub completion_status: Option<String>,
    pub has_video: bool,
    pub features: Vec<String>,
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from query parameters. Unparseable values are ignored.
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            action: params.get("action").and_then(Action::parse),
            category: params.text("category"),
            property_type: params.text("type"),
            subtype: params.text("subtype"),
            area: params.text("area"),
            developer: params.text("developer"),
            price: Range {
                min: params.number("minPrice"),
                max: params.number("maxPrice"),
            },
            bedrooms: params.count("beds"),
            bathrooms: params.count("baths"),
            sqft: Range {
                min: params.number("minSqft"),
                max: params.number("maxSqft"),
            },
            furnished: params.flag("furnished"),
            parking: params.text("parking"),
            property_age: params.text("propertyAge"),
            completion_status: params.text("completion"),
            has_video: params.flag("hasVideo").unwrap_or(false),
            features: params
                .get("features")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|f| !f.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            search: params.text("search"),
        }
    }
}

/// Everything needed to turn a snapshot into one page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub criteria: FilterCriteria,
    pub sort: SortStrategy,
    pub page: i64,
    pub page_size: usize,
    pub view: ViewMode,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortStrategy::default(),
            page: 1,
            page_size: crate::query::paginate::DEFAULT_PAGE_SIZE,
            view: ViewMode::default(),
        }
    }
}

impl ListingQuery {
    pub fn from_params(params: &QueryParams, page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::from_params(params),
            sort: params
                .get("sortBy")
                .and_then(SortStrategy::parse)
                .unwrap_or_default(),
            page: params
                .get("page")
                .and_then(|p| p.parse::<i64>().ok())
                .unwrap_or(1),
            page_size,
            view: params.get("view").and_then(ViewMode::parse).unwrap_or_default(),
        }
    }
}
