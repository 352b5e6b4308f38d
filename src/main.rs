//! A terminal back-office for partner records.
//!
//! Run the binary to browse the bundled partners, or point `--data` and
//! `--menu` at JSON files of the same shape.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState, Focus},
};
use crate::config::AppConfig;
use crate::core::{menu, menu_data, source::FixtureSource};
use crate::ui::{
    filter_bar::FilterBar, layout::AppLayout, menu_widget::MenuWidget,
    pagination_widget::PaginationBar, popup, table_widget::DataTableWidget, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Partner back-office in the terminal")]
struct Cli {
    /// Partner fixture (JSON array or `{"data": [...]}`); defaults to the bundled sample.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Menu configuration (JSON array of nodes); defaults to the built-in menu.
    #[arg(long)]
    menu: Option<PathBuf>,

    /// Rows per page, overriding the config file.
    #[arg(long = "page-size")]
    page_size: Option<u32>,

    /// Write the effective configuration to disk and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── drawing ───────────

fn pane_block<'a>(title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        })
}

/// Render one frame.  Also records the screen size for mouse hit-testing.
fn draw(frame: &mut Frame, state: &mut AppState) {
    state.screen = frame.area();
    let layout = AppLayout::from_area(frame.area(), state.sidebar_visible);

    let title = Line::from(vec![
        Span::styled(" Partner Desk ", Theme::title_style()),
        Span::styled(state.route.clone(), Theme::page_style()),
    ]);
    frame.render_widget(Paragraph::new(title), layout.title_area);

    if state.sidebar_visible {
        let rows = state.menu_rows();
        let focused = state.focus == Focus::Menu;
        let menu = MenuWidget::new(&rows, &state.route)
            .block(pane_block(" Menu ", focused))
            .focused(focused);
        frame.render_stateful_widget(menu, layout.sidebar_area, &mut state.menu_state);
    }

    frame.render_widget(
        FilterBar {
            block: pane_block(" Filtres ", state.search_editing),
            query: &state.search_input,
            editing: state.search_editing,
            nature: state.filters.nature_partner.as_deref(),
            partner_type: state.filters.partner_type.as_deref(),
            structure: state.filters.structure_partner.as_deref(),
            pending: state.search_dirty_at.is_some(),
        },
        layout.filter_area,
    );

    let model = state.table_state.model(
        &state.columns,
        &state.rows,
        state.data_generation,
        &state.table_options,
    );
    let focused = state.focus == Focus::Table && !state.search_editing;
    let table = DataTableWidget::new(&model)
        .block(pane_block(
            format!(" Partenaires ({}) ", state.pagination.total_items),
            focused,
        ))
        .focused_column(state.focused_column)
        .focused(focused);
    frame.render_stateful_widget(table, layout.table_area, &mut state.table_state);

    frame.render_widget(PaginationBar::new(&state.pagination), layout.pager_area);

    let hint = if state.search_editing {
        "Entrée: appliquer | Échap: fermer la recherche".to_string()
    } else {
        state.config.status_bar_hint()
    };
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::Help => {
            frame.render_widget(popup::HelpPopup { config: &state.config }, frame.area());
        }
        ActiveView::Details => {
            let area = frame.area();
            if let Some(partner) = state.selected_partner() {
                frame.render_widget(popup::DetailsPopup { partner }, area);
            }
        }
        ActiveView::Main => {}
    }
}

// ───────────────────────────────────────── event loop ────────

async fn run(terminal: &mut Terminal<CrosstermBackend<Stderr>>, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    tracing::warn!("event reader stopped");
                    break;
                };
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(width, height) => {
                        tracing::debug!(width, height, "terminal resized");
                    }
                    AppEvent::Tick(now) => handler::handle_tick(state, now),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                state.should_quit = true;
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; set RUST_LOG to see them.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(size) = cli.page_size {
        config.page_size = size.clamp(1, 500);
    }

    if cli.write_config {
        let path = config.save().context("writing configuration")?;
        println!("{}", path.display());
        return Ok(());
    }

    let menu = match &cli.menu {
        Some(path) => menu::load_menu(path)?,
        None => menu_data::default_menu(),
    };
    let source = match &cli.data {
        Some(path) => FixtureSource::load(path, config.page_size)?,
        None => FixtureSource::builtin(config.page_size)?,
    };
    if source.is_empty() {
        tracing::warn!("partner fixture has no records");
    }
    tracing::info!(partners = source.len(), page_size = config.page_size, "partner source ready");
    let mut state = AppState::new(&menu, Box::new(source), config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn state() -> AppState {
        let source = FixtureSource::builtin(10).unwrap();
        AppState::new(&menu_data::default_menu(), Box::new(source), AppConfig::default())
    }

    #[test]
    fn full_frame_shows_menu_table_and_pager() {
        let mut state = state();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Partner Desk"));
        assert!(text.contains("Partenariat"));
        assert!(text.contains("Partenaire ↕"));
        assert!(text.contains("Résultats 1-10 sur"));
        assert!(text.contains("Nature: Toute"));
        assert!(text.contains("Structure: Toute"));
        assert_eq!(state.screen.width, 120);
    }

    #[test]
    fn empty_result_draws_placeholder_and_hides_pager() {
        let mut state = state();
        state.search_input = "introuvable".into();
        state.apply_filters();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Aucun partenaire trouvé"));
        assert!(!text.contains("Résultats"));
    }
}
