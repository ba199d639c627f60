//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the client.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid model, terminal rendering, wire protocol).
//!
//! # Coordinates
//!
//! Grid-logical coordinates are `(x, y)` with `x` growing to the right and `y`
//! growing downwards. Each logical cell is drawn [`CELL_COLUMNS`] terminal
//! columns wide, so grid `(x, y)` lands on terminal column `x * 2`, row `y`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POLL_TIMEOUT_MS` | 50 | Bounded wait for one network read or one key read |
//! | `MAX_GRID_SIDE` | 4096 | Largest accepted grid width/height |
//!
//! # Examples
//!
//! ```
//! use tui_grid_types::{Direction, Position};
//!
//! let here = Position::new(2, 3);
//! assert_eq!(here.step(Direction::Up), Position::new(2, 2));
//!
//! assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
//! assert_eq!(Direction::Right.as_str(), "right");
//! ```

/// Terminal columns occupied by one logical grid cell.
pub const CELL_COLUMNS: u16 = 2;

/// Default bounded-wait interval for network and keyboard reads (50ms).
pub const POLL_TIMEOUT_MS: u64 = 50;

/// Largest accepted grid side. Keeps `x * CELL_COLUMNS` inside `u16`.
pub const MAX_GRID_SIDE: i32 = 4096;

/// A grid-logical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one cell away in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Terminal `(column, row)` of the left half of this cell.
    ///
    /// Returns `None` when the cell cannot be addressed by a `u16` cursor.
    pub fn terminal_origin(self) -> Option<(u16, u16)> {
        let col = u16::try_from(self.x).ok()?.checked_mul(CELL_COLUMNS)?;
        let row = u16::try_from(self.y).ok()?;
        Some((col, row))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid delta `(dx, dy)` for one step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Wire token for this direction.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parse a direction token (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

/// What a key press asks the client to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Move(Direction),
    Quit,
}
