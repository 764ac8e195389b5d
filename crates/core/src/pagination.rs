//! Page-number window for the pagination control.
//!
//! Page numbers here are one-based display numbers. The registry's
//! zero-based indices never reach this module.

use serde::Serialize;

/// Pages shown on each side of the current page.
pub const WINDOW_DELTA: u32 = 2;

/// One slot in the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Build the visible page list for `current` out of `total_pages`.
///
/// Always shows the first and last page plus [`WINDOW_DELTA`] pages on each
/// side of `current`; any gap collapses into one [`PageItem::Ellipsis`].
/// Returns an empty list when `total_pages <= 1`. `current` is clamped into
/// `1..=total_pages`.
///
/// # Examples
///
/// ```
/// use locator_core::pagination::{page_window, PageItem::*};
/// assert_eq!(
///     page_window(1, 10),
///     vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
/// );
/// assert!(page_window(1, 1).is_empty());
/// ```
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let start = current.saturating_sub(WINDOW_DELTA).max(2);
    let end = current.saturating_add(WINDOW_DELTA).min(total_pages - 1);

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// Whether a "previous" control is enabled.
pub fn has_previous(current: u32) -> bool {
    current > 1
}

/// Whether a "next" control is enabled.
pub fn has_next(current: u32, total_pages: u32) -> bool {
    current < total_pages
}

#[cfg(test)]
mod tests {
    use super::PageItem::*;
    use super::*;

    fn pages(items: &[PageItem]) -> Vec<u32> {
        items
            .iter()
            .filter_map(|i| match i {
                Page(n) => Some(*n),
                Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn nothing_for_single_or_empty() {
        assert!(page_window(1, 0).is_empty());
        assert!(page_window(1, 1).is_empty());
    }

    #[test]
    fn two_pages() {
        assert_eq!(page_window(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(page_window(2, 2), vec![Page(1), Page(2)]);
    }

    #[test]
    fn small_totals_have_no_ellipsis() {
        assert_eq!(
            page_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn middle_page_has_both_ellipses() {
        assert_eq!(
            page_window(10, 20),
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn last_page() {
        assert_eq!(
            page_window(20, 20),
            vec![Page(1), Ellipsis, Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn adjacent_window_has_no_leading_ellipsis() {
        assert_eq!(
            page_window(4, 20),
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_window(0, 3), page_window(1, 3));
        assert_eq!(page_window(99, 3), page_window(3, 3));
    }

    #[test]
    fn never_renders_outside_bounds() {
        for total in 0..30 {
            for current in 0..=total + 1 {
                let items = page_window(current, total);
                for p in pages(&items) {
                    assert!((1..=total).contains(&p), "page {p} of {total}");
                }
                let nums = pages(&items);
                let mut sorted = nums.clone();
                sorted.dedup();
                assert_eq!(nums, sorted, "duplicates for {current}/{total}");
            }
        }
    }

    #[test]
    fn prev_next() {
        assert!(!has_previous(1));
        assert!(has_previous(2));
        assert!(has_next(1, 2));
        assert!(!has_next(2, 2));
    }
}
