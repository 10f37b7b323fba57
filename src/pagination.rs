//! Display math shared by every list screen.

use serde::Serialize;

/// Numbered page links with `None` marking an elided gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// `max(1, ceil(total / limit))`.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 1;
    }
    total.div_ceil(limit).max(1)
}

/// Where the current page sits inside the whole collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl PageWindow {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = if page == 0 { 1 } else { page };
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }

    /// Zero-based index of the first row on this page.
    pub fn start_index(&self) -> usize {
        (self.page - 1) * self.limit
    }

    /// Exclusive end index, clamped to `total`.
    pub fn end_index(&self) -> usize {
        (self.start_index() + self.limit).min(self.total)
    }

    /// One-based index of the first row shown, `0` when nothing is shown.
    pub fn first_shown(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            (self.start_index() + 1).min(self.end_index())
        }
    }

    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing X to Y of Z".
    pub fn label(&self) -> String {
        format!(
            "Showing {} to {} of {}",
            self.first_shown(),
            self.end_index(),
            self.total
        )
    }

    pub fn links(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages, self.page, 2, 2, 4, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_has_floor_of_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn label_matches_window() {
        assert_eq!(PageWindow::new(1, 5, 12).label(), "Showing 1 to 5 of 12");
        assert_eq!(PageWindow::new(3, 5, 12).label(), "Showing 11 to 12 of 12");
        assert_eq!(PageWindow::new(1, 10, 0).label(), "Showing 0 to 0 of 0");
    }

    #[test]
    fn label_never_starts_past_the_end() {
        // Page 3 at limit 5, after the total dropped from 11 to 10.
        let window = PageWindow::new(3, 5, 10);
        assert_eq!(window.label(), "Showing 10 to 10 of 10");
        assert!(window.has_previous());
    }

    #[test]
    fn navigation_flags() {
        let first = PageWindow::new(1, 5, 12);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageWindow::new(3, 5, 12);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert!(!last.contains(4));
        assert!(!last.contains(0));

        let empty = PageWindow::new(1, 5, 0);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn links_elide_far_pages() {
        let window = PageWindow::new(10, 10, 200);
        assert_eq!(
            window.links(),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
        assert_eq!(PageWindow::new(1, 5, 12).links(), vec![Some(1), Some(2), Some(3)]);
    }
}
