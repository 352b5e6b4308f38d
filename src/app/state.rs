//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    menu::{MenuNode, MenuRow, MenuStyle, MenuTree},
    menu_data::PARTNERS_ROUTE,
    pagination::PaginationMeta,
    partner::{partner_columns, Partner},
    source::{next_choice, FilterOptions, PartnerFilters, PartnerSource},
    table::{Column, TableOptions, TableState, DEFAULT_EMPTY_TEXT},
};
use crate::ui::menu_widget::MenuWidgetState;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Main,
    Help,
    Details,
}

/// Pane receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Menu,
    #[default]
    Table,
}

/// Top-level application state.
pub struct AppState {
    /// Menu arena with per-dropdown open flags.
    pub menu: MenuTree,
    pub menu_state: MenuWidgetState,
    pub sidebar_visible: bool,
    /// Target of the last activated menu link.
    pub route: String,
    pub focus: Focus,

    /// Where partner pages come from.
    source: Box<dyn PartnerSource>,
    pub filters: PartnerFilters,
    /// Choices of the nature, type and structure filters.
    pub filter_options: FilterOptions,
    /// Text typed in the search box; applied to `filters` after the debounce.
    pub search_input: String,
    pub search_editing: bool,
    /// Time of the last unapplied search keystroke.
    pub search_dirty_at: Option<Instant>,

    /// Rows of the current page, as served.
    pub rows: Vec<Partner>,
    pub pagination: PaginationMeta,
    /// Bumped whenever `rows` is replaced.
    pub data_generation: u64,
    pub columns: Vec<Column<Partner>>,
    pub table_state: TableState,
    pub table_options: TableOptions,
    /// Column targeted by the sort key.
    pub focused_column: usize,

    pub active_view: ActiveView,
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub config: AppConfig,
    /// Terminal area of the last frame, for mouse hit-testing.
    pub screen: Rect,
}

impl AppState {
    pub fn new(menu: &[MenuNode], source: Box<dyn PartnerSource>, config: AppConfig) -> Self {
        let table_options = TableOptions {
            striped: config.striped,
            ..TableOptions::default()
        };
        let filter_options = source.options();
        let mut state = Self {
            menu: MenuTree::new(menu),
            menu_state: MenuWidgetState::default(),
            sidebar_visible: true,
            route: PARTNERS_ROUTE.to_string(),
            focus: Focus::default(),
            source,
            filters: PartnerFilters::default(),
            filter_options,
            search_input: String::new(),
            search_editing: false,
            search_dirty_at: None,
            rows: Vec::new(),
            pagination: PaginationMeta {
                current_page: 1,
                total_pages: 1,
                total_items: 0,
                items_per_page: config.page_size,
            },
            data_generation: 0,
            columns: partner_columns(),
            table_state: TableState::default(),
            table_options,
            focused_column: 0,
            active_view: ActiveView::default(),
            should_quit: false,
            status_message: None,
            config,
            screen: Rect::default(),
        };
        state.reveal_route();
        state.load_page(1);
        state
    }

    /// Hide or show the sidebar.  A hidden menu is unmounted, so showing it
    /// again starts from closed dropdowns with the current route revealed.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        if self.sidebar_visible {
            self.reveal_route();
        } else {
            self.menu.close_all();
            self.menu_state = MenuWidgetState::default();
            self.focus = Focus::Table;
        }
    }

    /// Open the menu down to the link of the current route and select it.
    fn reveal_route(&mut self) {
        let Some(id) = self.menu.find_route(&self.route) else {
            return;
        };
        self.menu.reveal(id);
        if let Some(row) = self.menu_rows().iter().position(|r| r.id == id) {
            self.menu_state.selected = row;
        }
    }

    pub fn menu_style(&self) -> MenuStyle {
        MenuStyle {
            base: 1,
            unit: self.config.menu_indent,
        }
    }

    pub fn menu_rows(&self) -> Vec<MenuRow> {
        self.menu.rows(self.menu_style())
    }

    // ── data ────────────────────────────────────────────────────

    /// Ask the source for `page`.  On failure the table gets no rows and the
    /// error text as its empty-state message.
    pub fn load_page(&mut self, page: u32) {
        match self.source.fetch(&self.filters, page) {
            Ok(response) => {
                self.pagination = response.pagination();
                tracing::debug!(
                    page,
                    rows = response.data.len(),
                    sort = ?self.table_state.sort(),
                    "page loaded"
                );
                self.rows = response.data;
                self.table_options.empty_text = if self.filters.is_empty() {
                    DEFAULT_EMPTY_TEXT.to_string()
                } else {
                    "Aucun partenaire trouvé".to_string()
                };
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "failed to load partners");
                self.rows.clear();
                self.pagination = PaginationMeta {
                    current_page: 1,
                    total_pages: 1,
                    total_items: 0,
                    items_per_page: self.config.page_size,
                };
                self.table_options.empty_text = format!("Erreur : {err}");
            }
        }
        self.data_generation = self.data_generation.wrapping_add(1);
        self.table_state.selected = 0;
        self.table_state.offset = 0;
    }

    /// `on_page_change` of the pagination bar.
    pub fn change_page(&mut self, page: u32) {
        if page != self.pagination.current_page {
            self.load_page(page);
        }
    }

    /// Commit the typed search and reload from the first page.
    pub fn apply_filters(&mut self) {
        self.filters.name = self.search_input.trim().to_string();
        self.search_dirty_at = None;
        tracing::debug!(filters = ?self.filters, "applying filters");
        self.load_page(1);
    }

    /// Apply a pending search once the debounce window has passed.
    pub fn flush_search(&mut self, now: Instant) {
        let window = Duration::from_millis(self.config.search_debounce_ms);
        if let Some(at) = self.search_dirty_at {
            if now.duration_since(at) >= window {
                self.apply_filters();
            }
        }
    }

    /// Cycle the nature filter: any → each known nature → any.
    pub fn cycle_nature_filter(&mut self) {
        let current = self.filters.nature_partner.as_deref();
        self.filters.nature_partner = next_choice(current, &self.filter_options.natures);
        self.apply_filters();
    }

    pub fn cycle_type_filter(&mut self) {
        let current = self.filters.partner_type.as_deref();
        self.filters.partner_type = next_choice(current, &self.filter_options.types);
        self.apply_filters();
    }

    pub fn cycle_structure_filter(&mut self) {
        let current = self.filters.structure_partner.as_deref();
        self.filters.structure_partner = next_choice(current, &self.filter_options.structures);
        self.apply_filters();
    }

    pub fn reset_filters(&mut self) {
        self.search_input.clear();
        self.search_editing = false;
        self.filters = PartnerFilters::default();
        self.apply_filters();
    }

    /// Partner under the table cursor, in sorted order.
    pub fn selected_partner(&mut self) -> Option<&Partner> {
        let selected = self.table_state.selected;
        let view = self
            .table_state
            .view(&self.rows, &self.columns, self.data_generation);
        let index = *view.get(selected)?;
        self.rows.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{menu_data::default_menu, source::FixtureSource};

    fn state(page_size: u32) -> AppState {
        let json = r#"[
            {"id": 1, "partner_name": "Banque Populaire", "partner_type": "National",
             "nature_partner": "Banque", "structure_partner": "Privée"},
            {"id": 2, "partner_name": "UNICEF", "partner_type": "International",
             "nature_partner": "Agence ONU", "structure_partner": "Multilatérale"},
            {"id": 3, "partner_name": "Fondation OCP", "partner_type": "National",
             "nature_partner": "Fondation", "structure_partner": "Privée"}
        ]"#;
        let source = FixtureSource::from_json(json, "test", page_size).unwrap();
        let config = AppConfig {
            page_size,
            ..AppConfig::default()
        };
        AppState::new(&default_menu(), Box::new(source), config)
    }

    #[test]
    fn first_page_is_loaded_on_start() {
        let s = state(2);
        assert_eq!(s.rows.len(), 2);
        assert_eq!(s.pagination.total_pages, 2);
        assert_eq!(s.route, PARTNERS_ROUTE);
        let rows = s.menu_rows();
        assert_eq!(rows[s.menu_state.selected].title, "Partenaires");
    }

    #[test]
    fn page_change_replaces_rows_and_keeps_sort() {
        let mut s = state(2);
        s.table_state.request_sort(&s.columns, "partner_name");
        s.change_page(2);
        assert_eq!(s.rows.len(), 1);
        assert_eq!(s.pagination.current_page, 2);
        assert!(s.table_state.sort().is_some());
    }

    #[test]
    fn search_waits_for_the_debounce() {
        let mut s = state(10);
        let typed = Instant::now();
        s.search_input = "unicef".into();
        s.search_dirty_at = Some(typed);

        s.flush_search(typed + Duration::from_millis(100));
        assert_eq!(s.rows.len(), 3);

        s.flush_search(typed + Duration::from_millis(400));
        assert_eq!(s.rows.len(), 1);
        assert!(s.search_dirty_at.is_none());
    }

    #[test]
    fn type_filter_cycles_back_to_any() {
        let mut s = state(10);
        s.cycle_type_filter();
        assert_eq!(s.filters.partner_type.as_deref(), Some("National"));
        assert_eq!(s.rows.len(), 2);
        s.cycle_type_filter();
        assert_eq!(s.filters.partner_type.as_deref(), Some("International"));
        s.cycle_type_filter();
        assert_eq!(s.filters.partner_type, None);
        assert_eq!(s.rows.len(), 3);
    }

    #[test]
    fn nature_and_structure_cycle_through_fixture_values() {
        let mut s = state(10);
        s.cycle_nature_filter();
        assert_eq!(s.filters.nature_partner.as_deref(), Some("Agence ONU"));
        assert_eq!(s.rows.len(), 1);

        s.cycle_nature_filter();
        s.cycle_structure_filter();
        assert_eq!(s.filters.nature_partner.as_deref(), Some("Banque"));
        assert_eq!(s.filters.structure_partner.as_deref(), Some("Multilatérale"));
        assert!(s.rows.is_empty());
        assert_eq!(s.table_options.empty_text, "Aucun partenaire trouvé");

        s.reset_filters();
        assert!(s.filters.is_empty());
        assert_eq!(s.rows.len(), 3);
    }

    #[test]
    fn failed_fetch_shows_error_and_a_single_empty_page() {
        let mut s = state(2);
        s.change_page(2);
        assert_eq!(s.pagination.current_page, 2);

        s.load_page(7);
        assert!(s.rows.is_empty());
        assert!(s.table_options.empty_text.starts_with("Erreur"));
        assert_eq!(s.pagination.total_items, 0);
        assert_eq!(s.pagination.total_pages, 1);
        assert!(!s.pagination.is_visible());
    }

    #[test]
    fn showing_the_sidebar_again_remounts_the_menu() {
        let mut s = state(10);
        let mounted = s.menu_rows();
        let dashboards = mounted[0].id;
        s.menu.activate(dashboards);
        assert_ne!(s.menu_rows(), mounted);

        s.toggle_sidebar();
        assert!(!s.sidebar_visible);
        assert_eq!(s.focus, Focus::Table);
        s.toggle_sidebar();
        assert_eq!(s.menu_rows(), mounted);
        assert_eq!(s.menu_rows()[s.menu_state.selected].title, "Partenaires");
    }

    #[test]
    fn selection_follows_sorted_order() {
        let mut s = state(10);
        s.table_state.request_sort(&s.columns, "partner_name");
        s.table_state.request_sort(&s.columns, "partner_name");
        assert_eq!(s.selected_partner().map(|p| p.id), Some(2));
    }
}
