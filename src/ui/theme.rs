//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Accent teal of the back-office.
const ACCENT: Color = Color::Rgb(0, 140, 149);

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── menu ───────────────────────────────────────────────────
    pub fn dropdown_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn link_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_link_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── table ──────────────────────────────────────────────────
    pub fn table_header_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused_column_style() -> Style {
        Self::table_header_style().add_modifier(Modifier::UNDERLINED)
    }

    pub fn row_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn alternate_row_style() -> Style {
        Style::default().fg(Color::White).bg(Color::Rgb(30, 34, 40))
    }

    pub fn placeholder_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── pagination ─────────────────────────────────────────────
    pub fn current_page_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn page_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn disabled_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn title_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn badge_style(text: &str) -> Style {
        let t = text.to_lowercase();
        let fg = if t.contains("prospect") {
            Color::Blue
        } else if t.contains("contrat actif") {
            Color::Green
        } else if t.contains("convention signée") {
            Color::Cyan
        } else if t.contains("en discussion") {
            Color::Yellow
        } else if t.contains("international") {
            Color::Magenta
        } else if t.contains("national") {
            Color::LightBlue
        } else {
            Color::Gray
        };
        Style::default().fg(fg)
    }
}
