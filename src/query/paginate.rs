use serde::Serialize;

use crate::models::Listing;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One window of a result list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

/// 1-indexed page number; anything below 1 means the first page.
pub fn clamp_page(page: i64) -> usize {
    usize::try_from(page.max(1)).unwrap_or(usize::MAX)
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slice out page `page`. Pages past the end come back empty.
pub fn paginate(listings: &[Listing], page: i64, page_size: usize) -> Page<Listing> {
    let page_size = page_size.max(1);
    let page = clamp_page(page);
    let start = (page - 1).saturating_mul(page_size);

    let items = listings
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        page,
        total_pages: total_pages(listings.len(), page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRecord, SourceCollection};
    use crate::normalizer::normalize;
    use serde_json::json;

    fn listings(n: usize) -> Vec<Listing> {
        (1..=n)
            .map(|i| {
                normalize(&RawRecord::from_value(
                    SourceCollection::Primary,
                    json!({"id": i.to_string()}),
                ))
            })
            .collect()
    }

    #[test]
    fn second_page_of_twenty_five() {
        let all = listings(25);
        let page = paginate(&all, 2, 20);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, "21");
        assert_eq!(page.items[4].id, "25");
    }

    #[test]
    fn non_positive_page_clamps_to_first() {
        let all = listings(3);
        assert_eq!(paginate(&all, 0, 2).page, 1);
        assert_eq!(paginate(&all, -4, 2).items.len(), 2);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let all = listings(3);
        let page = paginate(&all, 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
        assert!(paginate(&all, i64::MAX, 2).items.is_empty());
    }

    #[test]
    fn empty_input_has_one_page() {
        let page = paginate(&[], 1, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn pages_cover_without_gap_or_overlap() {
        let all = listings(47);
        let size = 10;
        let pages = total_pages(all.len(), size);
        let stitched: Vec<Listing> = (1..=pages as i64)
            .flat_map(|p| paginate(&all, p, size).items)
            .collect();
        assert_eq!(stitched, all);
    }
}
