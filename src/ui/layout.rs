//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the sidebar when shown.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Primary screen layout: title bar, optional sidebar, filter bar, table,
/// pagination bar, and status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub title_area: Rect,
    /// Zero-sized when the sidebar is collapsed.
    pub sidebar_area: Rect,
    pub filter_area: Rect,
    pub table_area: Rect,
    pub pager_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, sidebar_visible: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title bar
                Constraint::Min(6),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let sidebar_width = if sidebar_visible { SIDEBAR_WIDTH } else { 0 };
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
            .split(rows[1]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // filter bar
                Constraint::Min(3),    // table
                Constraint::Length(1), // pagination
            ])
            .split(body[1]);

        Self {
            title_area: rows[0],
            sidebar_area: body[0],
            filter_area: main[0],
            table_area: main[1],
            pager_area: main[2],
            status_area: rows[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_sidebar_gives_table_full_width() {
        let area = Rect::new(0, 0, 120, 40);
        let open = AppLayout::from_area(area, true);
        let closed = AppLayout::from_area(area, false);
        assert_eq!(open.sidebar_area.width, SIDEBAR_WIDTH);
        assert_eq!(closed.sidebar_area.width, 0);
        assert_eq!(closed.table_area.width, 120);
        assert_eq!(open.table_area.x, SIDEBAR_WIDTH);
        assert_eq!(open.pager_area.y + 1, open.status_area.y);
    }
}
