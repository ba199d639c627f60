//! Terminal grid renderer module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget/layout libraries and writes crossterm
//! commands straight into a byte buffer that is flushed once per frame.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Redraw only the cells the synchronizer reports as dirty
//! - Keep a fixed aspect ratio: every grid cell is 2 chars wide

pub mod cell_view;
pub mod grid_view;
pub mod renderer;
pub mod style;

pub use tui_grid_core as core;
pub use tui_grid_types as types;

pub use cell_view::{render_cell, Glyph, RenderContext, Tone};
pub use grid_view::{encode_dirty_into, encode_full_into};
pub use renderer::TerminalRenderer;
pub use style::{CellStyle, Rgb};
