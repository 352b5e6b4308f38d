//! Core logic – menu tree, generic table, pagination, and the partner domain.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type here can be driven and tested without a terminal.

pub mod collate;
pub mod menu;
pub mod menu_data;
pub mod pagination;
pub mod partner;
pub mod source;
pub mod table;
