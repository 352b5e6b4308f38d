//! Pagination display logic: page window, result range, and controls.
//!
//! The pager never slices data and keeps no page of its own: every control
//! resolves to a page number handed to the caller's `on_page_change`.

/// Externally computed paging summary (1-based pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

/// Pages shown on each side of the current page.
pub const WINDOW_DELTA: u32 = 1;

/// One slot of the page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Navigation controls around the page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First,
    Previous,
    Page(u32),
    Next,
    Last,
}

impl PaginationMeta {
    /// Hidden entirely when there is nothing to page through.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    fn current(&self) -> u32 {
        self.current_page.clamp(1, self.total_pages.max(1))
    }

    /// Compact page list: first page, `delta` pages around the current one,
    /// last page, and an ellipsis wherever a gap is left.
    pub fn window(&self, delta: u32) -> Vec<PageItem> {
        if !self.is_visible() {
            return Vec::new();
        }
        let total = self.total_pages;
        let current = self.current();

        let lo = current.saturating_sub(delta).max(2);
        let hi = current.saturating_add(delta).min(total - 1);

        let mut items = vec![PageItem::Page(1)];
        if current.saturating_sub(delta) > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((lo..=hi).map(PageItem::Page));
        if current.saturating_add(delta) < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
        items
    }

    /// 1-based `(start, end)` of the items on the current page.
    pub fn range(&self) -> (u64, u64) {
        let current = u64::from(self.current());
        let per_page = u64::from(self.items_per_page);
        let start = (current - 1) * per_page + 1;
        let end = (current * per_page).min(self.total_items);
        (start, end)
    }

    pub fn range_text(&self) -> String {
        let (start, end) = self.range();
        format!("{start}-{end}")
    }

    /// Target page of a control, or `None` when it is disabled.
    pub fn target(&self, control: PageControl) -> Option<u32> {
        let current = self.current();
        let last = self.total_pages.max(1);
        match control {
            PageControl::First | PageControl::Previous if current == 1 => None,
            PageControl::Next | PageControl::Last if current >= last => None,
            PageControl::First => Some(1),
            PageControl::Previous => Some(current - 1),
            PageControl::Next => Some(current + 1),
            PageControl::Last => Some(last),
            PageControl::Page(p) if (1..=last).contains(&p) => Some(p),
            PageControl::Page(_) => None,
        }
    }

    /// Resolve a click on `control`; enabled controls call `on_page_change`.
    pub fn click(&self, control: PageControl, mut on_page_change: impl FnMut(u32)) -> bool {
        match self.target(control) {
            Some(page) => {
                on_page_change(page);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    fn meta(current_page: u32, total_pages: u32) -> PaginationMeta {
        PaginationMeta {
            current_page,
            total_pages,
            total_items: u64::from(total_pages) * 20,
            items_per_page: 20,
        }
    }

    #[test]
    fn single_page_has_no_window() {
        assert!(!meta(1, 1).is_visible());
        assert!(meta(1, 1).window(WINDOW_DELTA).is_empty());
        assert!(meta(1, 0).window(WINDOW_DELTA).is_empty());
    }

    #[test]
    fn middle_page_gets_two_ellipses() {
        assert_eq!(
            meta(5, 10).window(1),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn small_gaps_need_no_ellipsis() {
        assert_eq!(meta(2, 3).window(1), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(meta(1, 2).window(1), vec![Page(1), Page(2)]);
        assert_eq!(meta(3, 5).window(1), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn edges_get_one_ellipsis() {
        assert_eq!(meta(1, 10).window(1), vec![Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(meta(10, 10).window(1), vec![Page(1), Ellipsis, Page(9), Page(10)]);
    }

    #[test]
    fn range_text_clamps_to_total() {
        let m = PaginationMeta {
            current_page: 3,
            total_pages: 3,
            total_items: 45,
            items_per_page: 20,
        };
        assert_eq!(m.range(), (41, 45));
        assert_eq!(m.range_text(), "41-45");
    }

    #[test]
    fn boundary_controls_are_disabled() {
        let first = meta(1, 4);
        assert_eq!(first.target(PageControl::First), None);
        assert_eq!(first.target(PageControl::Previous), None);
        assert_eq!(first.target(PageControl::Next), Some(2));
        assert_eq!(first.target(PageControl::Last), Some(4));

        let last = meta(4, 4);
        assert_eq!(last.target(PageControl::Next), None);
        assert_eq!(last.target(PageControl::Last), None);
        assert_eq!(last.target(PageControl::Previous), Some(3));
        assert_eq!(last.target(PageControl::Page(9)), None);
    }

    #[test]
    fn clicks_report_through_the_callback() {
        let mut requested = Vec::new();
        let m = meta(2, 4);
        assert!(m.click(PageControl::Next, |p| requested.push(p)));
        assert!(m.click(PageControl::Page(4), |p| requested.push(p)));
        assert!(!meta(1, 4).click(PageControl::Previous, |p| requested.push(p)));
        assert_eq!(requested, vec![3, 4]);
    }
}
