//! Ratatui widget that draws a [`TableModel`]: sortable header, striped
//! body, and the full-width empty-state row.

use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::table::{Align, BodyRow, Direction, HeaderCell, SortMark, TableModel, TableState};

use super::theme::Theme;

/// Split one table line into column cells.  Shared by rendering and mouse
/// hit-testing so both agree on geometry.
pub fn column_areas(line: Rect, header: &[HeaderCell]) -> Rc<[Rect]> {
    let constraints = header
        .iter()
        .map(|h| h.width.map_or(Constraint::Fill(1), Constraint::Length));
    Layout::horizontal(constraints).spacing(1).split(line)
}

/// Column index under `(x, y)` when `y` is the header line of `inner`.
pub fn header_hit(inner: Rect, header: &[HeaderCell], x: u16, y: u16) -> Option<usize> {
    if y != inner.y {
        return None;
    }
    let line = Rect { height: 1, ..inner };
    column_areas(line, header)
        .iter()
        .position(|r| x >= r.x && x < r.right())
}

/// Sorted-view index of the body row under terminal row `y`.
pub fn body_row_at(inner: Rect, state: &TableState, y: u16, len: usize) -> Option<usize> {
    let body_top = inner.y + 1;
    if y < body_top || y >= inner.bottom() {
        return None;
    }
    let idx = state.offset + (y - body_top) as usize;
    (idx < len).then_some(idx)
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

fn mark_suffix(mark: SortMark) -> &'static str {
    match mark {
        SortMark::Fixed => "",
        SortMark::Inactive => " ↕",
        SortMark::Active(Direction::Ascending) => " ▲",
        SortMark::Active(Direction::Descending) => " ▼",
    }
}

/// The table widget, built fresh each frame.
pub struct DataTableWidget<'a> {
    model: &'a TableModel,
    block: Option<Block<'a>>,
    /// Header cell underlined as the keyboard sort target.
    focused_column: Option<usize>,
    focused: bool,
}

impl<'a> DataTableWidget<'a> {
    pub fn new(model: &'a TableModel) -> Self {
        Self {
            model,
            block: None,
            focused_column: None,
            focused: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focused_column(mut self, column: usize) -> Self {
        self.focused_column = Some(column);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> StatefulWidget for DataTableWidget<'a> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // ── header ──────────────────────────────────────────────
        let header_line = Rect { height: 1, ..inner };
        buf.set_style(header_line, Theme::table_header_style());
        let cells = column_areas(header_line, &self.model.header);
        for (i, (cell, rect)) in self.model.header.iter().zip(cells.iter()).enumerate() {
            let style = if self.focused && self.focused_column == Some(i) {
                Theme::focused_column_style()
            } else {
                Theme::table_header_style()
            };
            Line::styled(format!("{}{}", cell.label, mark_suffix(cell.mark)), style)
                .alignment(alignment(cell.align))
                .render(*rect, buf);
        }

        // ── body ────────────────────────────────────────────────
        let body_height = inner.height.saturating_sub(1) as usize;
        let data_rows = self
            .model
            .body
            .iter()
            .filter(|r| matches!(r, BodyRow::Data { .. }))
            .count();
        if data_rows > 0 {
            state.selected = state.selected.min(data_rows - 1);
        }
        state.clamp_scroll(body_height);

        let visible = self
            .model
            .body
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(body_height);

        for (i, (row_idx, row)) in visible.enumerate() {
            let line = Rect {
                y: inner.y + 1 + i as u16,
                height: 1,
                ..inner
            };
            match row {
                BodyRow::Data {
                    cells, alternate, ..
                } => {
                    let style = if self.model.hover && self.focused && row_idx == state.selected {
                        Theme::selected_style()
                    } else if *alternate {
                        Theme::alternate_row_style()
                    } else {
                        Theme::row_style()
                    };
                    buf.set_style(line, style);
                    let areas = column_areas(line, &self.model.header);
                    for ((text, head), rect) in cells.iter().zip(&self.model.header).zip(areas.iter()) {
                        let cell_style = if head.badge {
                            style.patch(Theme::badge_style(text))
                        } else {
                            style
                        };
                        Line::styled(text.as_str(), cell_style)
                            .alignment(alignment(head.align))
                            .render(*rect, buf);
                    }
                }
                BodyRow::Placeholder { message, .. } => {
                    Line::styled(message.as_str(), Theme::placeholder_style())
                        .alignment(Alignment::Center)
                        .render(line, buf);
                }
            }
        }
    }
}
