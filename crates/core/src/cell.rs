//! Cell module - the typed contents of one grid coordinate.

use crate::types::Position;

/// What occupies a grid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Wall,
    Player { owner_id: String, is_self: bool },
    Enemy { id: String },
    Treasure { collected: bool },
    Exit,
}

impl CellKind {
    /// Walls are the only cells an entity may not occupy.
    pub fn is_walkable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Wall => "wall",
            CellKind::Player { .. } => "player",
            CellKind::Enemy { .. } => "enemy",
            CellKind::Treasure { .. } => "treasure",
            CellKind::Exit => "exit",
        }
    }
}

/// One addressable grid unit: a position plus what occupies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub pos: Position,
    pub kind: CellKind,
}

impl Cell {
    pub fn new(pos: Position, kind: CellKind) -> Self {
        Self { pos, kind }
    }

    pub fn empty(pos: Position) -> Self {
        Self::new(pos, CellKind::Empty)
    }

    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_block_movement() {
        let pos = Position::new(1, 1);
        let kinds = [
            (CellKind::Empty, true),
            (CellKind::Wall, false),
            (
                CellKind::Player {
                    owner_id: "p1".to_string(),
                    is_self: false,
                },
                true,
            ),
            (
                CellKind::Enemy {
                    id: "e1".to_string(),
                },
                true,
            ),
            (CellKind::Treasure { collected: false }, true),
            (CellKind::Exit, true),
        ];
        for (kind, walkable) in kinds {
            let name = kind.name();
            assert_eq!(Cell::new(pos, kind).is_walkable(), walkable, "{name}");
        }
    }
}
