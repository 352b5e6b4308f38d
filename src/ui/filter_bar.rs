//! Filter bar above the partner table: name search plus the nature, type
//! and structure choices.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::ui::theme::Theme;

pub struct FilterBar<'a> {
    pub block: Block<'a>,
    /// Text in the search box, applied or not.
    pub query: &'a str,
    pub editing: bool,
    pub nature: Option<&'a str>,
    pub partner_type: Option<&'a str>,
    pub structure: Option<&'a str>,
    /// Typed text not yet applied.
    pub pending: bool,
}

impl<'a> Widget for FilterBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let query_style = if self.editing {
            Theme::input_style().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        };
        let query = if self.query.is_empty() && !self.editing {
            Span::styled("Rechercher un partenaire…", Theme::disabled_style())
        } else {
            Span::styled(self.query.to_string(), query_style)
        };
        let cursor = if self.editing { "▏" } else { "" };
        let pending = if self.pending { " …" } else { "" };

        let mut spans = vec![
            Span::styled("Nom: ", label_style()),
            query,
            Span::styled(cursor, Theme::input_style()),
            Span::styled(pending, Theme::disabled_style()),
        ];
        spans.extend(choice("Nature", self.nature, "Toute"));
        spans.extend(choice("Type", self.partner_type, "Tous"));
        spans.extend(choice("Structure", self.structure, "Toute"));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

fn label_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Spans of one choice filter, with `any` shown when nothing is picked.
fn choice<'a>(label: &'a str, value: Option<&'a str>, any: &'a str) -> [Span<'a>; 3] {
    [
        Span::raw("    "),
        Span::styled(format!("{label}: "), label_style()),
        Span::styled(value.unwrap_or(any), Theme::badge_style(value.unwrap_or_default())),
    ]
}
