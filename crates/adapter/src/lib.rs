//! Adapter module - game server connection over WebSocket with JSON messages
//!
//! This module connects the terminal client to a grid game server and turns
//! its text frames into updates the synchronizer understands.
//!
//! # Protocol Overview
//!
//! Every frame is a single JSON object carried in a WebSocket text message:
//!
//! 1. **Connection**: Client opens a WebSocket to `SERVER_URI`
//! 2. **Level**: Server sends `init` with the grid size, walls and exit
//! 3. **Ticks**: Server sends `state` with every entity position
//! 4. **Commanding**: Client sends `move` when the player presses a direction
//!
//! # Message Types
//!
//! ## Server → Client
//!
//! - **init**: Grid dimensions, wall list, optional exit
//! - **state**: Self id, players, enemies, optional treasure
//!
//! Frames of any other type are ignored.
//!
//! ## Client → Server
//!
//! - **move**: One of `up`, `down`, `left`, `right`
//!
//! # Environment Variables
//!
//! - `SERVER_URI`: Server endpoint, must use the `ws://` scheme (required)
//! - `GRID_PRETTY_WALLS`: Set to "1" or "true" to draw box-drawing walls
//! - `GRID_POLL_MS`: Bounded wait for network and keyboard reads (default: 50)
//! - `GRID_LOG_PATH`: Write tracing output to this file
//!
//! # Example Protocol Flow
//!
//! ```text
//! Server -> Client: {"type":"init","width":5,"height":3,"walls":[{"x":0,"y":0}],"exit":{"x":4,"y":2}}
//! Server -> Client: {"type":"state","you":"p1","players":{"p1":{"x":1,"y":1}},"enemies":{},"treasure":{"x":3,"y":1,"collected":false}}
//! Client -> Server: {"type":"move","dir":"right"}
//! ```
//!
//! # Implementation
//!
//! - Uses **tokio** and **tokio-tungstenite** on a private runtime
//! - See [`protocol`] for message structure definitions
//! - See [`connection`] for the transport

pub mod config;
pub mod connection;
pub mod protocol;

pub use tui_grid_core as core;
pub use tui_grid_types as types;

pub use config::{ClientConfig, ConfigError};
pub use connection::{ConnectionError, MessageChannel, WsConnection};
pub use protocol::*;
