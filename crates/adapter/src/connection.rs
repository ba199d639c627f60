//! WebSocket transport for the game server.
//!
//! Bridges the synchronous client loop with an async WebSocket. The socket is
//! driven by a task on a private tokio runtime; the loop talks to it through
//! two channels and never blocks longer than the timeout it asks for.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

/// How long `close` waits for the close handshake.
const CLOSE_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to start transport runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("could not connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error("connection error: {0}")]
    Transport(String),
    #[error("server closed the connection")]
    Closed,
}

/// A bidirectional text message channel.
pub trait MessageChannel {
    /// Wait at most `timeout` for one text frame. `Ok(None)` means nothing arrived.
    /// A zero timeout only takes a frame that is already queued.
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<String>, ConnectionError>;

    fn send_text(&mut self, text: String) -> Result<(), ConnectionError>;
}

#[derive(Debug)]
enum TransportEvent {
    Text(String),
    Error(String),
    Closed,
}

#[derive(Debug)]
enum Outgoing {
    Text(String),
    Close,
}

/// A connected WebSocket. Dropping it closes the connection.
pub struct WsConnection {
    rt: Runtime,
    inbound: mpsc::UnboundedReceiver<TransportEvent>,
    outbound: mpsc::UnboundedSender<Outgoing>,
    task: Option<JoinHandle<()>>,
    closed: bool,
}

impl WsConnection {
    /// Connect to `url`, blocking until the handshake finishes or fails.
    pub fn connect(url: &Url) -> Result<Self, ConnectionError> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tui-grid-transport")
            .enable_all()
            .build()
            .map_err(ConnectionError::Runtime)?;

        let (ws, _response) =
            rt.block_on(connect_async(url.as_str()))
                .map_err(|source| ConnectionError::Connect {
                    url: url.to_string(),
                    source,
                })?;
        info!(%url, "connected");

        let (in_tx, inbound) = mpsc::unbounded_channel::<TransportEvent>();
        let (outbound, out_rx) = mpsc::unbounded_channel::<Outgoing>();
        let task = rt.spawn(pump(ws, in_tx, out_rx));

        Ok(Self {
            rt,
            inbound,
            outbound,
            task: Some(task),
            closed: false,
        })
    }

    /// Send a close frame and wait briefly for the socket task to finish.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let _ = self.outbound.send(Outgoing::Close);
        if let Some(task) = self.task.take() {
            let finished = self
                .rt
                .block_on(async { tokio::time::timeout(CLOSE_GRACE, task).await });
            if finished.is_err() {
                warn!("transport did not finish closing in time");
            }
        }
        info!("connection closed");
    }
}

impl MessageChannel for WsConnection {
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<String>, ConnectionError> {
        if self.closed {
            return Err(ConnectionError::Closed);
        }

        let event = if timeout.is_zero() {
            match self.inbound.try_recv() {
                Ok(event) => Some(event),
                Err(mpsc::error::TryRecvError::Empty) => return Ok(None),
                Err(mpsc::error::TryRecvError::Disconnected) => None,
            }
        } else {
            let inbound = &mut self.inbound;
            let waited = self
                .rt
                .block_on(async move { tokio::time::timeout(timeout, inbound.recv()).await });
            match waited {
                Err(_elapsed) => return Ok(None),
                Ok(event) => event,
            }
        };

        match event {
            Some(TransportEvent::Text(text)) => Ok(Some(text)),
            Some(TransportEvent::Error(e)) => Err(ConnectionError::Transport(e)),
            Some(TransportEvent::Closed) | None => Err(ConnectionError::Closed),
        }
    }

    fn send_text(&mut self, text: String) -> Result<(), ConnectionError> {
        if self.closed {
            return Err(ConnectionError::Closed);
        }
        self.outbound
            .send(Outgoing::Text(text))
            .map_err(|_| ConnectionError::Closed)
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.close();
    }
}

async fn pump(
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    in_tx: mpsc::UnboundedSender<TransportEvent>,
    mut out_rx: mpsc::UnboundedReceiver<Outgoing>,
) {
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            out = out_rx.recv() => match out {
                Some(Outgoing::Text(text)) => {
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        let _ = in_tx.send(TransportEvent::Error(e.to_string()));
                        break;
                    }
                }
                Some(Outgoing::Close) | None => {
                    let _ = sink.close().await;
                    break;
                }
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if in_tx.send(TransportEvent::Text(text)).is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "server sent close frame");
                    let _ = in_tx.send(TransportEvent::Closed);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    let _ = in_tx.send(TransportEvent::Error(e.to_string()));
                    break;
                }
                None => {
                    let _ = in_tx.send(TransportEvent::Closed);
                    break;
                }
            },
        }
    }
}
