use crate::models::Listing;
use crate::query::criteria::FilterCriteria;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// True when the listing satisfies every present criterion.
pub fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    if let Some(action) = criteria.action {
        if listing.status != action.status() {
            return false;
        }
    }

    if let Some(category) = &criteria.category {
        if listing.category.as_deref() != Some(category.as_str()) {
            return false;
        }
    }

    if let Some(kind) = &criteria.property_type {
        if !eq_ci(&listing.property_type, kind) {
            return false;
        }
    }

    if let Some(subtype) = &criteria.subtype {
        if !listing.subtype.as_deref().is_some_and(|s| eq_ci(s, subtype)) {
            return false;
        }
    }

    if let Some(area) = &criteria.area {
        let needle = area.to_lowercase();
        let hit = [&listing.area, &listing.city, &listing.location]
            .into_iter()
            .any(|field| contains_ci(field, &needle));
        if !hit {
            return false;
        }
    }

    if let Some(developer) = &criteria.developer {
        let needle = developer.to_lowercase();
        if !listing
            .developer
            .as_deref()
            .is_some_and(|d| contains_ci(d, &needle))
        {
            return false;
        }
    }

    if !criteria.price.contains(listing.price) {
        return false;
    }

    if criteria.bedrooms.is_some_and(|beds| listing.bedrooms != beds) {
        return false;
    }

    if criteria.bathrooms.is_some_and(|baths| listing.bathrooms != baths) {
        return false;
    }

    if !criteria.sqft.contains(listing.area_sqft) {
        return false;
    }

    match criteria.furnished {
        Some(true) if listing.furnished != Some(true) => return false,
        Some(false) if listing.furnished == Some(true) => return false,
        _ => {}
    }

    if let Some(parking) = &criteria.parking {
        if !listing.parking.as_deref().is_some_and(|p| eq_ci(p, parking)) {
            return false;
        }
    }

    if let Some(age) = &criteria.property_age {
        if listing.property_age.as_deref() != Some(age.as_str()) {
            return false;
        }
    }

    if let Some(completion) = &criteria.completion_status {
        if listing.completion_status != *completion {
            return false;
        }
    }

    if criteria.has_video && !listing.has_video() {
        return false;
    }

    if !criteria
        .features
        .iter()
        .all(|wanted| listing.features.iter().any(|f| f == wanted))
    {
        return false;
    }

    if let Some(search) = &criteria.search {
        if !matches_search(listing, &search.to_lowercase()) {
            return false;
        }
    }

    true
}

fn matches_search(listing: &Listing, needle: &str) -> bool {
    let fields = [
        Some(listing.title.as_str()),
        Some(listing.location.as_str()),
        Some(listing.area.as_str()),
        Some(listing.description.as_str()),
        listing.developer.as_deref(),
        listing.agent_name.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| contains_ci(field, needle))
}

/// Keep the listings that pass every criterion, in input order.
pub fn filter(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| matches(listing, criteria))
        .cloned()
        .collect()
}
