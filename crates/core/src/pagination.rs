//! Page window calculation and pagination controls
//!
//! Pure functions for turning a `(current, total_pages)` pair into the set of page
//! buttons a view renders, plus the owner-side state that commits navigation requests.
//! Nothing in here performs I/O; every view (the directory grid, the posts list) owns
//! its own [`Pager`] and renders a [`PaginationControl`] from it.

use serde::Serialize;

/// Number of page buttons shown at once.
pub const WINDOW_SIZE: usize = 5;

/// Compute the contiguous window of page numbers centered on `current`.
///
/// The window holds `min(total_pages, WINDOW_SIZE)` ascending pages and is shifted
/// right or left when it would cross the first or last page. A `current` outside
/// `[1, total_pages]` is clamped first, so callers always get the window of the
/// nearest valid page.
///
/// ```
/// use userdir_core::pagination::page_window;
///
/// assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
/// assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
/// assert!(page_window(1, 0).is_empty());
/// ```
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= WINDOW_SIZE {
        return (1..=total_pages).collect();
    }

    let current = current.clamp(1, total_pages);
    let half = WINDOW_SIZE / 2;

    let (start, end) = if current <= half {
        (1, WINDOW_SIZE)
    } else if current - half + WINDOW_SIZE - 1 > total_pages {
        (total_pages - WINDOW_SIZE + 1, total_pages)
    } else {
        let start = current - half;
        (start, start + WINDOW_SIZE - 1)
    };

    (start..=end).collect()
}

/// Number of pages needed to show `total_items` with `page_size` items per page
///
/// A zero page size yields zero pages rather than dividing by zero.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Calculate pagination bounds for a given page
///
/// Returns (start_index, end_index) for slicing the items array.
/// Returns an error if the page is out of range or if there are no items.
pub fn calculate_pagination(
    total_items: usize,
    page: usize,
    limit: usize,
) -> Result<(usize, usize), String> {
    if total_items == 0 {
        return Err("No items available for pagination".to_string());
    }

    if page == 0 || limit == 0 {
        return Err(format!("Page {page} is out of range. Pages start at 1."));
    }

    let start = match (page - 1).checked_mul(limit) {
        Some(start) if start < total_items => start,
        _ => {
            let total_pages = total_pages(total_items, limit);
            return Err(format!(
                "Page {page} is out of range. Only {total_pages} pages available."
            ));
        }
    };

    let end = start.saturating_add(limit).min(total_items);
    Ok((start, end))
}

/// Slice out one page of `items`, returning an empty slice for out-of-range pages.
pub fn paginate<T>(items: &[T], page: usize, limit: usize) -> &[T] {
    match calculate_pagination(items.len(), page, limit) {
        Ok((start, end)) => &items[start..end],
        Err(_) => &[],
    }
}

/// A request from a pagination control to show a specific page.
///
/// The target is not validated; the owner decides whether to commit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageChange(pub usize);

impl PageChange {
    pub fn page(self) -> usize {
        self.0
    }
}

/// The activatable parts of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Page(usize),
}

/// A single numbered button in the rendered window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: usize,
    pub is_current: bool,
    pub title: String,
}

/// Stateless view over `(current, total_pages)` that knows which buttons to render
/// and which navigation request each one produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControl {
    current: usize,
    total_pages: usize,
}

impl PaginationControl {
    pub const PREVIOUS_LABEL: &'static str = "Previous page";
    pub const NEXT_LABEL: &'static str = "Next page";

    pub fn new(current: usize, total_pages: usize) -> Self {
        Self {
            current,
            total_pages,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Numbered buttons for the current window, in display order.
    pub fn buttons(&self) -> Vec<PageButton> {
        page_window(self.current, self.total_pages)
            .into_iter()
            .map(|page| PageButton {
                page,
                is_current: page == self.current,
                title: format!("Page {page}"),
            })
            .collect()
    }

    pub fn prev_disabled(&self) -> bool {
        self.current <= 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current >= self.total_pages
    }

    /// Whether the control is worth rendering at all (more than one page).
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Translate an activation into a navigation request.
    ///
    /// Numbered buttons request exactly their label, including the current page.
    /// Disabled previous/next controls produce nothing.
    pub fn activate(&self, control: Control) -> Option<PageChange> {
        match control {
            Control::Page(page) => Some(PageChange(page)),
            Control::Previous if self.prev_disabled() => None,
            Control::Previous => Some(PageChange(self.current - 1)),
            Control::Next if self.next_disabled() => None,
            Control::Next => Some(PageChange(self.current + 1)),
        }
    }
}

/// Page state held by the view that owns a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total_pages: usize,
}

impl Pager {
    pub fn new(total_pages: usize) -> Self {
        Self {
            current: 1,
            total_pages,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn control(&self) -> PaginationControl {
        PaginationControl::new(self.current, self.total_pages)
    }

    /// Commit a navigation request if it lands inside `[1, total_pages]`.
    ///
    /// Returns `false` and leaves the state untouched otherwise.
    pub fn apply(&mut self, change: PageChange) -> bool {
        let page = change.page();
        if page == 0 || page > self.total_pages {
            return false;
        }
        self.current = page;
        true
    }

    /// Replace the page count. Any change sends the view back to page 1.
    pub fn set_total_pages(&mut self, total_pages: usize) {
        if total_pages != self.total_pages {
            self.total_pages = total_pages;
            self.current = 1;
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_first_page() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_middle() {
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_page_window_near_end() {
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_last_page() {
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_few_pages() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(5, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_empty() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_page_window_clamps_out_of_range_current() {
        assert_eq!(page_window(0, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(42, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_properties() {
        for total in 0..=40 {
            for current in 1..=total.max(1) {
                let window = page_window(current, total);

                assert_eq!(window.len(), total.min(WINDOW_SIZE), "({current}, {total})");
                if total >= 1 {
                    assert!(window.contains(&current), "({current}, {total})");
                }
                assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
                assert!(window.iter().all(|p| (1..=total).contains(p)));

                if total >= WINDOW_SIZE && current <= 3 {
                    assert_eq!(window, vec![1, 2, 3, 4, 5]);
                }
                if total >= WINDOW_SIZE && current + 2 >= total {
                    assert_eq!(window, ((total - 4)..=total).collect::<Vec<_>>());
                }

                assert_eq!(window, page_window(current, total));
            }
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 9), 0);
        assert_eq!(total_pages(10, 9), 2);
        assert_eq!(total_pages(9, 9), 1);
        assert_eq!(total_pages(100, 5), 20);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_calculate_pagination_basic() {
        let (start, end) = calculate_pagination(100, 2, 10).unwrap();
        assert_eq!(start, 10);
        assert_eq!(end, 20);
    }

    #[test]
    fn test_calculate_pagination_last_page() {
        let (start, end) = calculate_pagination(95, 10, 10).unwrap();
        assert_eq!(start, 90);
        assert_eq!(end, 95);
    }

    #[test]
    fn test_calculate_pagination_out_of_bounds() {
        let result = calculate_pagination(100, 20, 10);
        assert!(result.unwrap_err().contains("Page 20 is out of range"));
    }

    #[test]
    fn test_calculate_pagination_page_zero() {
        assert!(calculate_pagination(100, 0, 10).is_err());
    }

    #[test]
    fn test_calculate_pagination_empty() {
        let result = calculate_pagination(0, 1, 10);
        assert!(result.unwrap_err().contains("No items available"));
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 3, 5), &[11, 12]);
        assert!(paginate(&items, 4, 5).is_empty());
    }

    #[test]
    fn test_paginate_huge_page_is_empty() {
        let items: Vec<u32> = (1..=12).collect();
        assert!(paginate(&items, usize::MAX, 5).is_empty());
        assert!(calculate_pagination(12, usize::MAX, 5).is_err());
        assert_eq!(calculate_pagination(12, 1, usize::MAX), Ok((0, 12)));
    }

    #[test]
    fn test_control_first_page() {
        let control = PaginationControl::new(1, 10);
        assert!(control.prev_disabled());
        assert!(!control.next_disabled());

        let pages: Vec<usize> = control.buttons().iter().map(|b| b.page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_control_middle_page() {
        let control = PaginationControl::new(5, 10);
        assert!(!control.prev_disabled());
        assert!(!control.next_disabled());
    }

    #[test]
    fn test_control_near_end_still_has_next() {
        let control = PaginationControl::new(8, 10);
        assert!(!control.prev_disabled());
        assert!(!control.next_disabled());
    }

    #[test]
    fn test_control_last_page() {
        let control = PaginationControl::new(10, 10);
        assert!(control.next_disabled());
        assert_eq!(control.activate(Control::Next), None);
    }

    #[test]
    fn test_control_single_page() {
        let control = PaginationControl::new(1, 1);
        assert!(control.prev_disabled());
        assert!(control.next_disabled());
        assert!(!control.is_visible());
        assert_eq!(control.buttons().len(), 1);
    }

    #[test]
    fn test_control_three_pages() {
        let control = PaginationControl::new(1, 3);
        assert!(control.prev_disabled());
        assert!(!control.next_disabled());
        assert_eq!(control.buttons().len(), 3);
    }

    #[test]
    fn test_control_marks_current_button() {
        let control = PaginationControl::new(1, 10);
        let current: Vec<PageButton> = control
            .buttons()
            .into_iter()
            .filter(|b| b.is_current)
            .collect();

        assert_eq!(current.len(), 1);
        assert_eq!(current[0].page, 1);
        assert_eq!(current[0].title, "Page 1");
    }

    #[test]
    fn test_control_button_titles() {
        let control = PaginationControl::new(5, 10);
        for button in control.buttons() {
            assert_eq!(button.title, format!("Page {}", button.page));
        }
    }

    #[test]
    fn test_control_activate() {
        let control = PaginationControl::new(2, 10);
        assert_eq!(control.activate(Control::Page(4)), Some(PageChange(4)));
        assert_eq!(control.activate(Control::Previous), Some(PageChange(1)));
        assert_eq!(control.activate(Control::Next), Some(PageChange(3)));
    }

    #[test]
    fn test_control_reselecting_current_page() {
        let control = PaginationControl::new(3, 10);
        assert_eq!(control.activate(Control::Page(3)), Some(PageChange(3)));
    }

    #[test]
    fn test_control_does_not_clamp_page_requests() {
        let control = PaginationControl::new(1, 3);
        assert_eq!(control.activate(Control::Page(99)), Some(PageChange(99)));
    }

    #[test]
    fn test_control_previous_disabled_on_first_page() {
        let control = PaginationControl::new(1, 10);
        assert_eq!(control.activate(Control::Previous), None);
    }

    #[test]
    fn test_pager_applies_valid_changes() {
        let mut pager = Pager::new(10);
        assert_eq!(pager.current(), 1);

        assert!(pager.apply(PageChange(2)));
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_pager_ignores_out_of_range_changes() {
        let mut pager = Pager::new(3);
        assert!(!pager.apply(PageChange(0)));
        assert!(!pager.apply(PageChange(4)));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_pager_resets_when_total_changes() {
        let mut pager = Pager::new(10);
        pager.apply(PageChange(7));

        pager.set_total_pages(10);
        assert_eq!(pager.current(), 7);

        pager.set_total_pages(4);
        assert_eq!(pager.current(), 1);
        assert_eq!(pager.total_pages(), 4);
    }

    #[test]
    fn test_pager_round_trip_through_control() {
        let mut pager = Pager::new(10);
        let change = pager.control().activate(Control::Next).unwrap();
        pager.apply(change);

        assert_eq!(pager.current(), 2);
        assert_eq!(pager.control().buttons().len(), WINDOW_SIZE);
    }
}
