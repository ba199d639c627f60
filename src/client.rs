//! Client loop: connection phases, message dispatch, rendering and input.
//!
//! The loop is a single synchronous task. Each tick waits a bounded time for a
//! server frame, applies every frame already queued behind it, redraws what
//! changed, then waits a bounded time for a key.

use std::io;
use std::time::Duration;

use crossterm::event::KeyEvent;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::adapter::{encode_move, parse_server_message, ConnectionError, MessageChannel};
use crate::adapter::{ProtocolError, ServerMessage};
use crate::core::{DirtySet, GridInit, StateUpdate, SyncError, World};
use crate::input::{map_key, plan_move, KeySource};
use crate::term::{encode_dirty_into, encode_full_into, RenderContext, TerminalRenderer};
use crate::types::{Direction, Intent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connecting,
    /// Connected, waiting for the first `init`.
    Syncing,
    Running,
    Closing,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Malformed(#[from] ProtocolError),
    #[error("lost sync with server: {0}")]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("failed to encode move: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("keyboard error: {0}")]
    Input(#[from] io::Error),
    #[error("terminal error: {0:#}")]
    Terminal(anyhow::Error),
}

impl ClientError {
    /// Whether the loop has to stop. Bad frames are dropped and the loop goes on.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ClientError::Malformed(_) | ClientError::Sync(SyncError::NotInitialized)
        )
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Send(Direction),
    Ignored,
}

/// Somewhere to put encoded frames.
pub trait Screen {
    fn draw(&mut self, frame: &[u8]) -> anyhow::Result<()>;
}

impl Screen for TerminalRenderer {
    fn draw(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        TerminalRenderer::draw(self, frame)
    }
}

impl Screen for Vec<u8> {
    fn draw(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.extend_from_slice(frame);
        Ok(())
    }
}

/// Client-side session state.
#[derive(Debug)]
pub struct Client {
    world: World,
    pretty_walls: bool,
    phase: Phase,
    full_redraw: bool,
    pending: DirtySet,
}

impl Client {
    pub fn new(pretty_walls: bool) -> Self {
        Self {
            world: World::new(),
            pretty_walls,
            phase: Phase::Connecting,
            full_redraw: false,
            pending: DirtySet::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Record that the transport is up. The next `init` starts the round.
    pub fn mark_connected(&mut self) {
        if self.phase == Phase::Connecting {
            self.phase = Phase::Syncing;
        }
    }

    pub fn mark_closing(&mut self) {
        self.phase = Phase::Closing;
    }

    /// Decode one server frame and apply it to the world.
    pub fn handle_text(&mut self, text: &str) -> Result<(), ClientError> {
        match parse_server_message(text)? {
            ServerMessage::Init(msg) => {
                let init = GridInit::from(msg);
                self.world.apply_init(&init)?;
                info!(width = init.width, height = init.height, "level received");
                self.full_redraw = true;
                self.pending.clear();
                if self.phase == Phase::Syncing {
                    self.phase = Phase::Running;
                }
            }
            ServerMessage::State(msg) => {
                if self.phase != Phase::Running {
                    warn!(phase = ?self.phase, "state before init, ignoring");
                    return Ok(());
                }
                let dirty = self.world.apply_state(&StateUpdate::from(msg))?;
                self.pending.extend(dirty);
            }
            ServerMessage::Other(kind) => {
                debug!(%kind, "ignoring message");
            }
        }
        Ok(())
    }

    /// Encode whatever changed since the last call. Returns false when there
    /// is nothing to draw.
    pub fn render_into(&mut self, out: &mut Vec<u8>) -> Result<bool, ClientError> {
        let Some(grid) = self.world.grid() else {
            return Ok(false);
        };
        let ctx = RenderContext::new(grid.width(), grid.height())
            .with_pretty_walls(self.pretty_walls);

        if self.full_redraw {
            encode_full_into(grid, &ctx, out).map_err(ClientError::Terminal)?;
        } else if !self.pending.is_empty() {
            encode_dirty_into(grid, &self.pending, &ctx, out).map_err(ClientError::Terminal)?;
        } else {
            return Ok(false);
        }

        self.full_redraw = false;
        self.pending.clear();
        Ok(true)
    }

    pub fn handle_key(&self, key: KeyEvent) -> KeyOutcome {
        match map_key(key) {
            Some(Intent::Quit) => KeyOutcome::Quit,
            Some(Intent::Move(dir)) if self.phase == Phase::Running => plan_move(dir, &self.world)
                .map(KeyOutcome::Send)
                .unwrap_or(KeyOutcome::Ignored),
            _ => KeyOutcome::Ignored,
        }
    }
}

/// Upper bound on frames handled between two renders.
const MAX_FRAMES_PER_TICK: usize = 1024;

/// Run until the user quits (`Ok`) or a fatal error occurs.
///
/// Call after the transport is up and [`Client::mark_connected`] has been
/// called. The client ends in [`Phase::Closing`] either way.
pub fn run_loop<C, K, S>(
    client: &mut Client,
    channel: &mut C,
    keys: &mut K,
    screen: &mut S,
    poll: Duration,
) -> Result<(), ClientError>
where
    C: MessageChannel,
    K: KeySource,
    S: Screen,
{
    let result = drive(client, channel, keys, screen, poll);
    client.mark_closing();
    result
}

fn drive<C, K, S>(
    client: &mut Client,
    channel: &mut C,
    keys: &mut K,
    screen: &mut S,
    poll: Duration,
) -> Result<(), ClientError>
where
    C: MessageChannel,
    K: KeySource,
    S: Screen,
{
    let mut frame = Vec::with_capacity(16 * 1024);

    loop {
        // Wait for one frame, then take everything already queued so the
        // screen never falls behind the server.
        let mut next = channel.recv_timeout(poll)?;
        let mut handled = 0;
        while let Some(text) = next {
            dispatch(client, &text)?;
            handled += 1;
            if handled == MAX_FRAMES_PER_TICK {
                break;
            }
            next = channel.recv_timeout(Duration::ZERO)?;
        }

        frame.clear();
        if client.render_into(&mut frame)? {
            screen.draw(&frame).map_err(ClientError::Terminal)?;
        }

        if let Some(key) = keys.next_key(poll)? {
            match client.handle_key(key) {
                KeyOutcome::Quit => {
                    info!("quit requested");
                    return Ok(());
                }
                KeyOutcome::Send(dir) => {
                    channel.send_text(encode_move(dir)?)?;
                    debug!(dir = dir.as_str(), "move sent");
                }
                KeyOutcome::Ignored => {}
            }
        }
    }
}

fn dispatch(client: &mut Client, text: &str) -> Result<(), ClientError> {
    match client.handle_text(text) {
        Err(e) if !e.is_fatal() => {
            warn!(error = %e, "dropping server message");
            Ok(())
        }
        other => other,
    }
}
