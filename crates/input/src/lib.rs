//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Intent`], validates moves against
//! the synchronized grid, and reads keys with a bounded wait so the client loop
//! never stalls on the keyboard.

pub mod map;
pub mod movement;
pub mod source;

pub use tui_grid_core as core;
pub use tui_grid_types as types;

pub use map::{map_key, should_quit};
pub use movement::plan_move;
pub use source::{KeySource, TerminalKeys};
