//! Ratatui widget that draws rendered [`MenuRow`]s as an indented,
//! collapsible sidebar menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::menu::{MenuRow, RowKind};

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the menu widget (selected row, scroll offset).
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuWidgetState {
    /// Index into the rendered rows.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
}

impl MenuWidgetState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside `len` rows after the menu shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }

    /// Row index under terminal row `y`, given the widget's inner area.
    pub fn row_at(&self, inner: Rect, y: u16, len: usize) -> Option<usize> {
        if y < inner.y || y >= inner.bottom() {
            return None;
        }
        let idx = self.offset + (y - inner.y) as usize;
        (idx < len).then_some(idx)
    }
}

// ───────────────────────────────────────── widget ────────────

/// The menu widget, built fresh each frame.
pub struct MenuWidget<'a> {
    rows: &'a [MenuRow],
    /// Links whose target equals this route are highlighted.
    route: &'a str,
    block: Option<Block<'a>>,
    /// Whether the selection highlight is drawn.
    focused: bool,
}

impl<'a> MenuWidget<'a> {
    pub fn new(rows: &'a [MenuRow], route: &'a str) -> Self {
        Self {
            rows,
            route,
            block: None,
            focused: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn line(&self, row: &MenuRow, selected: bool) -> Line<'a> {
        let indent = " ".repeat(row.indent as usize);
        let (marker, style) = match &row.kind {
            RowKind::Dropdown { open } => (if *open { "▼ " } else { "▶ " }, Theme::dropdown_style()),
            RowKind::Header => ("─ ", Theme::header_style()),
            RowKind::Link { target } if target == self.route => ("• ", Theme::active_link_style()),
            RowKind::Link { .. } => ("  ", Theme::link_style()),
        };
        let style = if selected { Theme::selected_style() } else { style };
        let icon = row
            .icon
            .as_deref()
            .map(|i| format!("{i} "))
            .unwrap_or_default();
        let title = match row.kind {
            RowKind::Header => row.title.to_uppercase(),
            _ => row.title.clone(),
        };

        Line::from(vec![
            Span::raw(indent),
            Span::styled(format!("{marker}{icon}{title}"), style),
        ])
    }
}

impl<'a> StatefulWidget for MenuWidget<'a> {
    type State = MenuWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        state.clamp(self.rows.len());
        state.clamp_scroll(inner.height as usize);

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, (row_idx, row)) in visible.enumerate() {
            let y = inner.y + i as u16;
            let selected = self.focused && row_idx == state.selected;
            let line = self.line(row, selected);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
