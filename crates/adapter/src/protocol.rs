//! Protocol module - JSON message types exchanged with the game server
//!
//! Every frame is a JSON object with a `type` field. The client understands
//! `init` and `state` and ignores any other type; it only ever sends `move`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GridInit, StateUpdate, TreasureUpdate};
use crate::types::{Direction, Position};

/// A server frame that could not be turned into a message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("malformed message: missing string \"type\" field")]
    MissingType,
    #[error("malformed {kind} message: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WirePos {
    pub x: i32,
    pub y: i32,
}

impl From<WirePos> for Position {
    fn from(value: WirePos) -> Self {
        Position::new(value.x, value.y)
    }
}

/// Level layout, sent when a round starts.
#[derive(Debug, Clone, Deserialize)]
pub struct InitMessage {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<WirePos>,
    #[serde(default)]
    pub exit: Option<WirePos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TreasureSnapshot {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub collected: bool,
}

/// Entity positions, sent on every server tick.
#[derive(Debug, Clone, Deserialize)]
pub struct StateMessage {
    #[serde(default)]
    pub you: Option<String>,
    pub players: EntityPositions,
    pub enemies: EntityPositions,
    #[serde(default)]
    pub treasure: Option<TreasureSnapshot>,
}

/// Id -> position pairs in document order.
///
/// Accepts either an object keyed by id or an array of positions, in which
/// case each entry's id is its index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPositions(pub Vec<(String, WirePos)>);

impl<'de> Deserialize<'de> for EntityPositions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = EntityPositions;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an object of id -> {{x, y}} or an array of {{x, y}}")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, pos)) = map.next_entry::<String, WirePos>()? {
                    out.push((id, pos));
                }
                Ok(EntityPositions(out))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(pos) = seq.next_element::<WirePos>()? {
                    out.push((out.len().to_string(), pos));
                }
                Ok(EntityPositions(out))
            }
        }

        deserializer.deserialize_any(V)
    }
}

impl From<InitMessage> for GridInit {
    fn from(value: InitMessage) -> Self {
        Self {
            width: value.width,
            height: value.height,
            walls: value.walls.into_iter().map(Position::from).collect(),
            exit: value.exit.map(Position::from),
        }
    }
}

impl From<StateMessage> for StateUpdate {
    fn from(value: StateMessage) -> Self {
        let convert = |list: EntityPositions| -> Vec<(String, Position)> {
            list.0
                .into_iter()
                .map(|(id, pos)| (id, Position::from(pos)))
                .collect()
        };
        Self {
            you: value.you,
            players: convert(value.players),
            enemies: convert(value.enemies),
            treasure: value.treasure.map(|t| TreasureUpdate {
                pos: Position::new(t.x, t.y),
                collected: t.collected,
            }),
        }
    }
}

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MoveType {
    #[default]
    #[serde(rename = "move")]
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectionLower {
    #[serde(rename = "up")]
    Up,
    #[serde(rename = "down")]
    Down,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
}

impl From<Direction> for DirectionLower {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

/// Move request
#[derive(Debug, Clone, Serialize)]
pub struct MoveMessage {
    #[serde(rename = "type")]
    pub msg_type: MoveType,
    pub dir: DirectionLower,
}

pub(crate) fn create_move(dir: Direction) -> MoveMessage {
    MoveMessage {
        msg_type: MoveType::Move,
        dir: dir.into(),
    }
}

/// Serialize a move request into a text frame.
pub fn encode_move(dir: Direction) -> Result<String, serde_json::Error> {
    serde_json::to_string(&create_move(dir))
}

// ============== Message Parsing ==============

/// Decoded server message
#[derive(Debug, Clone)]
pub enum ServerMessage {
    Init(InitMessage),
    State(StateMessage),
    /// A well-formed message of a type this client does not handle.
    Other(String),
}

/// Parse a server text frame.
///
/// The payload is decoded straight from the text (not via `serde_json::Value`)
/// so entity maps keep the server's ordering.
pub fn parse_server_message(json: &str) -> Result<ServerMessage, ProtocolError> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(rename = "type", default)]
        kind: Option<serde_json::Value>,
    }

    let envelope: Envelope = serde_json::from_str(json).map_err(ProtocolError::InvalidJson)?;
    let kind = match envelope.kind {
        Some(serde_json::Value::String(kind)) => kind,
        _ => return Err(ProtocolError::MissingType),
    };

    match kind.as_str() {
        "init" => serde_json::from_str::<InitMessage>(json)
            .map(ServerMessage::Init)
            .map_err(|source| ProtocolError::Malformed {
                kind: "init",
                source,
            }),
        "state" => serde_json::from_str::<StateMessage>(json)
            .map(ServerMessage::State)
            .map_err(|source| ProtocolError::Malformed {
                kind: "state",
                source,
            }),
        _ => Ok(ServerMessage::Other(kind)),
    }
}
