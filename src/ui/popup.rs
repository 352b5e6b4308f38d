//! Popup overlay widgets for the key reference and partner details.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::config::{Action, AppConfig};
use crate::core::partner::{format_date, Partner};

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

// ───────────────────────────────────────── help popup ────────

/// Key reference built from the live bindings.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // one row per action, blank lines, hint, borders
        let height = (Action::ALL.len() as u16) + 5;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Raccourcis ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default().fg(Color::Yellow);
        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("   {:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count() + 1)
                .max(1);
            let keys = self.config.display_bindings(action);
            lines.push(Line::from(vec![
                Span::styled(label_col, Style::default().fg(Color::White)),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Esc: fermer",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── details popup ─────

/// Read-only card for one partner and its contacts.
pub struct DetailsPopup<'a> {
    pub partner: &'a Partner,
}

impl<'a> DetailsPopup<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        let p = self.partner;
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);
        let field = |name: &'static str, v: Option<&str>| {
            Line::from(vec![
                Span::styled(format!("  {name:<16}"), label),
                Span::styled(v.filter(|s| !s.is_empty()).unwrap_or("N/A").to_string(), value),
            ])
        };

        let mut lines = vec![
            Line::raw(""),
            field("Nom", Some(p.partner_name.as_str())),
            field("Abréviation", p.abbreviation.as_deref()),
            field("Type", p.partner_type.as_deref()),
            field("Nature", p.nature_partner.as_deref()),
            field("Structure", p.structure_partner.as_deref()),
            field("Statut", p.status.as_deref()),
            field("Actions/Projets", p.actions.as_deref()),
            field("Pays", p.country.as_deref()),
            field("Adresse", p.address.as_deref()),
            field("Téléphone", p.phone.as_deref()),
            field("Email", p.email.as_deref()),
            field("Créé le", p.created_at.as_deref().map(format_date).as_deref()),
        ];
        if let Some(note) = p.note.as_deref().filter(|n| !n.is_empty()) {
            lines.push(field("Note", Some(note)));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("  Contacts ({})", p.contact_people.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if p.contact_people.is_empty() {
            lines.push(Line::from(Span::styled("    Aucun contact", label)));
        }
        for contact in &p.contact_people {
            let extra: Vec<&str> = [
                contact.position.as_deref(),
                contact.email.as_deref(),
                contact.phone.as_deref(),
            ]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
            lines.push(Line::from(vec![
                Span::styled(format!("    • {}", contact.full_name()), value),
                Span::styled(
                    if extra.is_empty() {
                        String::new()
                    } else {
                        format!("  ({})", extra.join(", "))
                    },
                    label,
                ),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("  Esc: fermer", label)));
        lines
    }
}

impl<'a> Widget for DetailsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let popup = centered_fixed(70, lines.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = popup_block(" Informations sur le partenaire ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
