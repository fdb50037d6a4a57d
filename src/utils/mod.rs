//! Pagination over a fully ranked candidate list.

use crate::models::{FeedPage, ScoredCandidate};

/// Slice a ranked list into a fixed-size page.
///
/// Pages are 1-based. Any out-of-range request (page 0 included) returns
/// the last valid page instead of erroring; an empty list is a single
/// valid empty page.
pub fn paginate(items: Vec<ScoredCandidate>, page: usize, per_page: usize) -> FeedPage {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = if (1..=total_pages).contains(&page) {
        page
    } else {
        total_pages
    };

    let start = (page - 1) * per_page;
    let items: Vec<ScoredCandidate> = items.into_iter().skip(start).take(per_page).collect();

    FeedPage {
        items,
        page,
        per_page,
        total_pages,
        total_items,
    }
}
