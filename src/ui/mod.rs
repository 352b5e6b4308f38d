//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No data loading happens here.

pub mod filter_bar;
pub mod layout;
pub mod menu_widget;
pub mod pagination_widget;
pub mod popup;
pub mod table_widget;
pub mod theme;
