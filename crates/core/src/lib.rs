//! Core grid model - pure, deterministic, and testable
//!
//! This crate holds the client's copy of the game world and the logic that keeps
//! it in sync with the server. It has **zero dependencies** on terminals,
//! networking, or I/O, making it:
//!
//! - **Deterministic**: Same sequence of updates produces the same grid
//! - **Testable**: Every synchronization rule is covered by plain unit tests
//! - **Renderer-friendly**: Each update reports exactly which coordinates changed
//!
//! # Module Structure
//!
//! - [`cell`]: Typed cell variants (empty, wall, player, enemy, treasure, exit)
//! - [`grid`]: Fixed-size cell container with bounds-checked access
//! - [`registry`]: Tracked players and enemies by id
//! - [`update`]: Decoded `init` / `state` payloads
//! - [`world`]: The state synchronizer producing dirty sets
//!
//! # Example
//!
//! ```
//! use tui_grid_core::{CellKind, GridInit, StateUpdate, World};
//! use tui_grid_types::Position;
//!
//! let mut world = World::new();
//! world
//!     .apply_init(&GridInit {
//!         width: 5,
//!         height: 5,
//!         walls: vec![Position::new(0, 0)],
//!         exit: Some(Position::new(4, 4)),
//!     })
//!     .unwrap();
//!
//! let dirty = world
//!     .apply_state(&StateUpdate {
//!         you: Some("p1".to_string()),
//!         players: vec![("p1".to_string(), Position::new(2, 2))],
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! assert_eq!(dirty.len(), 1);
//! assert!(matches!(
//!     world.grid().unwrap().get(Position::new(2, 2)).unwrap().kind,
//!     CellKind::Player { is_self: true, .. }
//! ));
//! ```

pub mod cell;
pub mod grid;
pub mod registry;
pub mod update;
pub mod world;

pub use tui_grid_types as types;

// Re-export commonly used types for convenience
pub use cell::{Cell, CellKind};
pub use grid::{Grid, GridError};
pub use registry::{EntityKind, EntityRegistry};
pub use update::{GridInit, StateUpdate, TreasureUpdate};
pub use world::{DirtySet, SyncError, World};
