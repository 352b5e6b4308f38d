//! Input handling — maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Margin, Position, Rect};

use crate::config::Action;
use crate::core::menu::{MenuAction, MenuId, RowKind};
use crate::core::pagination::PageControl;
use crate::ui::layout::AppLayout;
use crate::ui::pagination_widget::control_regions;
use crate::ui::table_widget::{body_row_at, header_hit};

use super::state::{ActiveView, AppState, Focus};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Main if state.search_editing => handle_search_key(state, key),
        ActiveView::Main => handle_main_key(state, key),
        ActiveView::Help => close_overlay_on(state, key, Action::Help),
        ActiveView::Details => close_overlay_on(state, key, Action::ShowDetails),
    }
}

/// Any pending search is applied once the debounce window has passed.
pub fn handle_tick(state: &mut AppState, now: Instant) {
    state.flush_search(now);
}

fn close_overlay_on(state: &mut AppState, key: KeyEvent, toggle: Action) {
    let action = state.config.match_key(key);
    if key.code == KeyCode::Esc || action == Some(toggle) || action == Some(Action::Quit) {
        state.active_view = ActiveView::Main;
    }
}

// ── search box ──────────────────────────────────────────────────

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            state.search_editing = false;
            state.apply_filters();
        }
        KeyCode::Esc => {
            // Leave the box; a pending edit is still applied by the debounce.
            state.search_editing = false;
        }
        KeyCode::Backspace => {
            if state.search_input.pop().is_some() {
                state.search_dirty_at = Some(Instant::now());
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.search_input.push(c);
            state.search_dirty_at = Some(Instant::now());
        }
        _ => {}
    }
}

// ── main view (configurable bindings) ───────────────────────────

fn handle_main_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.active_view = ActiveView::Help,
        Action::ToggleSidebar => state.toggle_sidebar(),
        Action::SwitchPane => {
            state.focus = match state.focus {
                Focus::Table if state.sidebar_visible => Focus::Menu,
                _ => Focus::Table,
            };
        }
        Action::Search => {
            state.focus = Focus::Table;
            state.search_editing = true;
        }
        Action::CycleNature => state.cycle_nature_filter(),
        Action::CycleType => state.cycle_type_filter(),
        Action::CycleStructure => state.cycle_structure_filter(),
        Action::ResetFilters => state.reset_filters(),
        Action::NextPage => go_to(state, PageControl::Next),
        Action::PrevPage => go_to(state, PageControl::Previous),
        Action::FirstPage => go_to(state, PageControl::First),
        Action::LastPage => go_to(state, PageControl::Last),
        Action::ShowDetails => open_details(state),
        _ => match state.focus {
            Focus::Menu => handle_menu_action(state, action),
            Focus::Table => handle_table_action(state, action),
        },
    }
}

/// Route a page control through the pager.  Disabled controls do nothing.
fn go_to(state: &mut AppState, control: PageControl) {
    let mut target = None;
    state.pagination.click(control, |page| target = Some(page));
    if let Some(page) = target {
        state.change_page(page);
    }
}

fn open_details(state: &mut AppState) {
    if state.selected_partner().is_some() {
        state.active_view = ActiveView::Details;
    }
}

fn handle_menu_action(state: &mut AppState, action: Action) {
    let rows = state.menu_rows();
    let Some(row) = rows.get(state.menu_state.selected) else {
        return;
    };
    let id = row.id;

    match action {
        Action::MoveUp => state.menu_state.select_prev(),
        Action::MoveDown => state.menu_state.select_next(rows.len()),
        Action::Activate => activate_menu(state, id),
        Action::Expand => match row.kind {
            RowKind::Dropdown { open: true } | RowKind::Header => {}
            _ => activate_menu(state, id),
        },
        Action::Collapse => {
            if state.menu.collapse(id) {
                return;
            }
            // Closed or leaf: jump to the enclosing dropdown.
            if let Some(parent) = state.menu.parent(id) {
                if let Some(pos) = rows.iter().position(|r| r.id == parent) {
                    state.menu_state.selected = pos;
                }
            }
        }
        _ => {}
    }
}

fn activate_menu(state: &mut AppState, id: MenuId) {
    match state.menu.activate(id) {
        MenuAction::Navigate(target) => {
            tracing::info!(route = %target, "navigate");
            state.status_message = Some(format!("→ {target}"));
            state.route = target;
        }
        MenuAction::Toggled { open } => {
            if let Some(entry) = state.menu.get(id) {
                tracing::debug!(key = %entry.key, open, "menu toggled");
            }
            // Opening a section may close rows above this one.
            let rows = state.menu_rows();
            match rows.iter().position(|r| r.id == id) {
                Some(pos) => state.menu_state.selected = pos,
                None => state.menu_state.clamp(rows.len()),
            }
        }
        MenuAction::None => {}
    }
}

fn handle_table_action(state: &mut AppState, action: Action) {
    let last_column = state.columns.len().saturating_sub(1);
    let focused = state.focused_column;
    match action {
        Action::MoveUp => state.table_state.select_prev(),
        Action::MoveDown => state.table_state.select_next(state.rows.len()),
        Action::Expand => state.focused_column = (focused + 1).min(last_column),
        Action::Collapse => state.focused_column = focused.saturating_sub(1),
        Action::SortColumn => sort_by_column(state, focused),
        Action::Activate => open_details(state),
        _ => {}
    }
}

fn sort_by_column(state: &mut AppState, column: usize) {
    let Some(key) = state.columns.get(column).map(|c| c.key.clone()) else {
        return;
    };
    if !state.table_state.request_sort(&state.columns, &key) {
        state.status_message = Some("Colonne non triable".to_string());
    }
}

// ── mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  Geometry is recomputed from the last drawn
/// screen so hit-testing agrees with what is on the terminal.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Main {
        if let MouseEventKind::Down(_) = mouse.kind {
            state.active_view = ActiveView::Main;
        }
        return;
    }

    let layout = AppLayout::from_area(state.screen, state.sidebar_visible);
    let at = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.status_message = None;
            if layout.sidebar_area.contains(at) {
                click_menu(state, layout.sidebar_area, at);
            } else if layout.filter_area.contains(at) {
                state.focus = Focus::Table;
                state.search_editing = true;
            } else if layout.table_area.contains(at) {
                click_table(state, layout.table_area, at);
            } else if layout.pager_area.contains(at) {
                let hit = control_regions(layout.pager_area, &state.pagination)
                    .into_iter()
                    .find(|(rect, _)| rect.contains(at));
                if let Some((_, control)) = hit {
                    go_to(state, control);
                }
            }
        }
        MouseEventKind::ScrollDown => {
            if layout.sidebar_area.contains(at) {
                let len = state.menu_rows().len();
                state.menu_state.select_next(len);
            } else {
                state.table_state.select_next(state.rows.len());
            }
        }
        MouseEventKind::ScrollUp => {
            if layout.sidebar_area.contains(at) {
                state.menu_state.select_prev();
            } else {
                state.table_state.select_prev();
            }
        }
        _ => {}
    }
}

/// Inside of a bordered pane.
fn pane_inner(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

fn click_menu(state: &mut AppState, area: Rect, at: Position) {
    state.focus = Focus::Menu;
    let rows = state.menu_rows();
    let Some(idx) = state.menu_state.row_at(pane_inner(area), at.y, rows.len()) else {
        return;
    };
    state.menu_state.selected = idx;
    activate_menu(state, rows[idx].id);
}

fn click_table(state: &mut AppState, area: Rect, at: Position) {
    state.focus = Focus::Table;
    let inner = pane_inner(area);
    let model = state.table_state.model(
        &state.columns,
        &state.rows,
        state.data_generation,
        &state.table_options,
    );

    if let Some(column) = header_hit(inner, &model.header, at.x, at.y) {
        state.focused_column = column;
        sort_by_column(state, column);
        return;
    }

    if let Some(row) = body_row_at(inner, &state.table_state, at.y, state.rows.len()) {
        // A second click on the selected row opens it.
        if row == state.table_state.selected {
            open_details(state);
        } else {
            state.table_state.selected = row;
        }
    }
}
