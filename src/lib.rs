//! TUI Grid (workspace facade crate).
//!
//! The grid model, renderer, input mapping and server adapter live in dedicated
//! crates under `crates/`; this package re-exports them as
//! `tui_grid::{core,adapter,term,input,types}` and owns the client loop.

pub use tui_grid_adapter as adapter;
pub use tui_grid_core as core;
pub use tui_grid_input as input;
pub use tui_grid_term as term;
pub use tui_grid_types as types;

pub mod client;
pub mod logging;
