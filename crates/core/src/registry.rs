//! Tracked entity registry: id -> last known position.
//!
//! The grid owns every cell; the registry only remembers where each tracked
//! entity was last placed so a move can vacate the old coordinate.

use std::collections::HashMap;

use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    players: HashMap<String, Position>,
    enemies: HashMap<String, Position>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: EntityKind) -> &HashMap<String, Position> {
        match kind {
            EntityKind::Player => &self.players,
            EntityKind::Enemy => &self.enemies,
        }
    }

    pub fn get(&self, kind: EntityKind, id: &str) -> Option<Position> {
        self.map(kind).get(id).copied()
    }

    /// Record `id` at `pos`, returning the previous position if it was tracked.
    pub fn upsert(&mut self, kind: EntityKind, id: &str, pos: Position) -> Option<Position> {
        let map = match kind {
            EntityKind::Player => &mut self.players,
            EntityKind::Enemy => &mut self.enemies,
        };
        match map.get_mut(id) {
            Some(slot) => Some(std::mem::replace(slot, pos)),
            None => {
                map.insert(id.to_string(), pos);
                None
            }
        }
    }

    pub fn players(&self) -> &HashMap<String, Position> {
        &self.players
    }

    pub fn enemies(&self) -> &HashMap<String, Position> {
        &self.enemies
    }

    pub fn clear(&mut self) {
        self.players.clear();
        self.enemies.clear();
    }
}
