//! Decoded server updates, independent of the wire encoding.

use crate::types::Position;

/// Level layout sent once per round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridInit {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<Position>,
    pub exit: Option<Position>,
}

/// Treasure descriptor carried by a state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasureUpdate {
    pub pos: Position,
    pub collected: bool,
}

/// Entity positions pushed by the server.
///
/// `players` and `enemies` keep the order the server wrote them in; the
/// synchronizer applies them in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateUpdate {
    pub you: Option<String>,
    pub players: Vec<(String, Position)>,
    pub enemies: Vec<(String, Position)>,
    pub treasure: Option<TreasureUpdate>,
}

impl StateUpdate {
    /// Every coordinate the update would write.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.players
            .iter()
            .chain(self.enemies.iter())
            .map(|(_, pos)| *pos)
            .chain(self.treasure.map(|t| t.pos))
    }
}
