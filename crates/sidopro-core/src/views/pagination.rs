//! Page-number window for pagination controls.
//!
//! The window is a pure function of the current page and the page count.
//! Previous/next enablement is supplied by the caller, so the same control
//! serves offset-based and cursor-based sources.

use serde::{Serialize, Serializer};

/// Maximum number of page buttons before the window collapses.
pub const MAX_PAGE_BUTTONS: u32 = 7;

/// A single pagination button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMarker::Page(n) => serializer.serialize_u32(*n),
            PageMarker::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Computes the page buttons for `current` of `total` pages.
///
/// Up to [`MAX_PAGE_BUTTONS`] pages are all listed. Beyond that the first and
/// last page are kept with one neighbour on each side of the current page; a
/// hidden run of more than one page collapses into an ellipsis.
///
/// ```rust
/// use sidopro_core::views::pagination::{page_markers, PageMarker::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_markers(10, 20),
///     vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
/// );
/// ```
pub fn page_markers(current: u32, total: u32) -> Vec<PageMarker> {
    if total == 0 {
        return Vec::new();
    }
    if total <= MAX_PAGE_BUTTONS {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);

    let mut markers = vec![PageMarker::Page(1)];
    push_gap(&mut markers, 2, start);
    markers.extend((start..=end).map(PageMarker::Page));
    push_gap(&mut markers, end + 1, total);
    markers.push(PageMarker::Page(total));
    markers
}

/// Fills the hidden pages `from..to`.
fn push_gap(markers: &mut Vec<PageMarker>, from: u32, to: u32) {
    match to.saturating_sub(from) {
        0 => {}
        1 => markers.push(PageMarker::Page(from)),
        _ => markers.push(PageMarker::Ellipsis),
    }
}

/// View state of a pagination control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub markers: Vec<PageMarker>,
}

impl Pagination {
    pub fn new(current_page: u32, total_pages: u32, has_prev: bool, has_next: bool) -> Self {
        Self {
            current_page,
            total_pages,
            has_prev,
            has_next,
            markers: page_markers(current_page, total_pages),
        }
    }
}

/// One page of an offset-paginated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub pagination: Pagination,
}

/// Slices `items` into the requested 1-based page.
///
/// Out-of-range pages are clamped to the nearest existing page; a zero
/// `per_page` is treated as one row per page.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Page<T> {
    let per_page = per_page.max(1) as usize;
    let total_items = items.len();
    let total_pages = u32::try_from(total_items.div_ceil(per_page)).unwrap_or(u32::MAX);
    let current = page.clamp(1, total_pages.max(1));

    let offset = (current as usize - 1) * per_page;
    let items: Vec<T> = items.into_iter().skip(offset).take(per_page).collect();

    Page {
        items,
        total_items,
        pagination: Pagination::new(current, total_pages, current > 1, current < total_pages),
    }
}
