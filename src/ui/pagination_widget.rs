//! Pagination bar: result range on the left, page controls on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::pagination::{PageControl, PageItem, PaginationMeta, WINDOW_DELTA};

use super::theme::Theme;

/// Labels of the bar's controls, left to right.  Ellipses carry no control.
fn pieces(meta: &PaginationMeta) -> Vec<(String, Option<PageControl>)> {
    let mut out = vec![
        ("«".to_string(), Some(PageControl::First)),
        ("‹".to_string(), Some(PageControl::Previous)),
    ];
    out.extend(meta.window(WINDOW_DELTA).into_iter().map(|item| match item {
        PageItem::Page(p) => (format!(" {p} "), Some(PageControl::Page(p))),
        PageItem::Ellipsis => ("...".to_string(), None),
    }));
    out.push(("›".to_string(), Some(PageControl::Next)));
    out.push(("»".to_string(), Some(PageControl::Last)));
    out
}

/// Right-aligned placement of every piece, one column apart.
fn placed(area: Rect, meta: &PaginationMeta) -> Vec<(Rect, String, Option<PageControl>)> {
    let pieces = pieces(meta);
    let total: usize = pieces.iter().map(|(t, _)| Span::raw(t.as_str()).width()).sum::<usize>()
        + pieces.len().saturating_sub(1);
    let mut x = area.right().saturating_sub(total as u16).max(area.x);

    pieces
        .into_iter()
        .map(|(text, control)| {
            let width = Span::raw(text.as_str()).width() as u16;
            let rect = Rect::new(x, area.y, width, 1).intersection(area);
            x = x.saturating_add(width + 1);
            (rect, text, control)
        })
        .collect()
}

/// Screen regions of the clickable controls, for mouse hit-testing.
pub fn control_regions(area: Rect, meta: &PaginationMeta) -> Vec<(Rect, PageControl)> {
    if !meta.is_visible() {
        return Vec::new();
    }
    placed(area, meta)
        .into_iter()
        .filter_map(|(rect, _, control)| Some((rect, control?)))
        .collect()
}

pub struct PaginationBar<'a> {
    meta: &'a PaginationMeta,
}

impl<'a> PaginationBar<'a> {
    pub fn new(meta: &'a PaginationMeta) -> Self {
        Self { meta }
    }

    fn style_for(&self, control: Option<PageControl>) -> Style {
        match control {
            Some(PageControl::Page(p)) if p == self.meta.current_page => Theme::current_page_style(),
            Some(c) if self.meta.target(c).is_some() => Theme::page_style(),
            _ => Theme::disabled_style(),
        }
    }
}

impl<'a> Widget for PaginationBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.meta.is_visible() || area.height == 0 {
            return;
        }

        let summary = Line::from(vec![
            Span::styled("Résultats ", Theme::page_style()),
            Span::styled(self.meta.range_text(), Theme::title_style()),
            Span::styled(" sur ", Theme::page_style()),
            Span::styled(self.meta.total_items.to_string(), Theme::title_style()),
        ]);
        buf.set_line(area.x, area.y, &summary, area.width);

        for (rect, text, control) in placed(area, self.meta) {
            if rect.is_empty() {
                continue;
            }
            buf.set_stringn(rect.x, rect.y, &text, rect.width as usize, self.style_for(control));
        }
    }
}
