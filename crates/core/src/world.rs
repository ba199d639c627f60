//! World module - client-side mirror of the server's grid
//!
//! [`World`] applies decoded server updates to the locally held [`Grid`] and
//! reports which coordinates changed, so the renderer only redraws those.
//!
//! # Update semantics
//!
//! - `init` replaces the grid: walls and the optional exit on an empty field.
//! - `state` moves or creates tracked players and enemies in message order.
//!   A moving entity vacates its previous coordinate only if that coordinate
//!   still shows the entity; otherwise a later write already claimed it.
//!   Within one message the last write to a coordinate wins.
//! - Vacated coordinates revert to their terrain: the exit stays an exit,
//!   everything else becomes empty.
//! - Registry entries are never dropped when an id goes missing from a later
//!   message.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::cell::{Cell, CellKind};
use crate::grid::{Grid, GridError};
use crate::registry::{EntityKind, EntityRegistry};
use crate::types::Position;
use crate::update::{GridInit, StateUpdate};

/// Coordinates whose cell contents changed during one apply.
pub type DirtySet = HashSet<Position>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("state update received before init")]
    NotInitialized,
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Synchronized world state: grid, tracked entities and self identity.
#[derive(Debug, Clone, Default)]
pub struct World {
    grid: Option<Grid>,
    registry: EntityRegistry,
    you: Option<String>,
    exit: Option<Position>,
    treasure: Option<Position>,
}

/// Records the first-seen value of every coordinate written during an apply.
#[derive(Default)]
struct Touched {
    before: HashMap<Position, Cell>,
}

impl Touched {
    fn write(&mut self, grid: &mut Grid, pos: Position, kind: CellKind) -> Result<(), GridError> {
        if !self.before.contains_key(&pos) {
            let before = grid.get(pos)?.clone();
            self.before.insert(pos, before);
        }
        grid.set(pos, kind)
    }

    fn into_dirty(self, grid: &Grid) -> DirtySet {
        self.before
            .into_iter()
            .filter(|(pos, before)| grid.get(*pos).map(|now| now != before).unwrap_or(false))
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    /// Id of the player this client controls, once the server has named it.
    pub fn you(&self) -> Option<&str> {
        self.you.as_deref()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn exit(&self) -> Option<Position> {
        self.exit
    }

    pub fn treasure(&self) -> Option<Position> {
        self.treasure
    }

    /// Last known position of the self player.
    pub fn self_position(&self) -> Option<Position> {
        let you = self.you.as_deref()?;
        self.registry.get(EntityKind::Player, you)
    }

    /// Build a fresh grid from a level layout.
    ///
    /// On error the previous grid stays in place.
    pub fn apply_init(&mut self, init: &GridInit) -> Result<(), SyncError> {
        let mut grid = Grid::new(init.width, init.height)?;
        for wall in &init.walls {
            grid.set(*wall, CellKind::Wall)?;
        }
        if let Some(exit) = init.exit {
            grid.set(exit, CellKind::Exit)?;
        }

        self.grid = Some(grid);
        self.registry.clear();
        self.exit = init.exit;
        self.treasure = None;
        Ok(())
    }

    /// Apply entity positions and return the coordinates that changed.
    ///
    /// Every coordinate is bounds-checked first, so a failing update leaves
    /// the grid untouched.
    pub fn apply_state(&mut self, update: &StateUpdate) -> Result<DirtySet, SyncError> {
        let Self {
            grid,
            registry,
            you,
            exit,
            treasure,
        } = self;
        let grid = grid.as_mut().ok_or(SyncError::NotInitialized)?;

        for pos in update.positions() {
            grid.check(pos)?;
        }

        if let Some(id) = &update.you {
            *you = Some(id.clone());
        }

        let mut touched = Touched::default();

        for (id, pos) in &update.players {
            let kind = CellKind::Player {
                owner_id: id.clone(),
                is_self: you.as_deref() == Some(id.as_str()),
            };
            place(grid, registry, *exit, &mut touched, EntityKind::Player, id, *pos, kind)?;
        }

        for (id, pos) in &update.enemies {
            let kind = CellKind::Enemy { id: id.clone() };
            place(grid, registry, *exit, &mut touched, EntityKind::Enemy, id, *pos, kind)?;
        }

        if let Some(t) = update.treasure {
            if let Some(prev) = *treasure {
                if prev != t.pos && matches!(grid.get(prev)?.kind, CellKind::Treasure { .. }) {
                    touched.write(grid, prev, terrain_at(*exit, prev))?;
                }
            }
            touched.write(
                grid,
                t.pos,
                CellKind::Treasure {
                    collected: t.collected,
                },
            )?;
            *treasure = Some(t.pos);
        }

        Ok(touched.into_dirty(grid))
    }
}

/// What a coordinate shows once nothing stands on it.
fn terrain_at(exit: Option<Position>, pos: Position) -> CellKind {
    if exit == Some(pos) {
        CellKind::Exit
    } else {
        CellKind::Empty
    }
}

fn holds_entity(cell: &Cell, kind: EntityKind, id: &str) -> bool {
    match (kind, &cell.kind) {
        (EntityKind::Player, CellKind::Player { owner_id, .. }) => owner_id == id,
        (EntityKind::Enemy, CellKind::Enemy { id: enemy_id }) => enemy_id == id,
        _ => false,
    }
}

#[allow(clippy::too_many_arguments)]
fn place(
    grid: &mut Grid,
    registry: &mut EntityRegistry,
    exit: Option<Position>,
    touched: &mut Touched,
    entity: EntityKind,
    id: &str,
    pos: Position,
    kind: CellKind,
) -> Result<(), GridError> {
    if let Some(prev) = registry.upsert(entity, id, pos) {
        if prev != pos && holds_entity(grid.get(prev)?, entity, id) {
            touched.write(grid, prev, terrain_at(exit, prev))?;
        }
    }
    touched.write(grid, pos, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::TreasureUpdate;

    fn bordered(width: i32, height: i32) -> GridInit {
        let mut walls = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    walls.push(Position::new(x, y));
                }
            }
        }
        GridInit {
            width,
            height,
            walls,
            exit: None,
        }
    }

    fn players(entries: &[(&str, i32, i32)]) -> Vec<(String, Position)> {
        entries
            .iter()
            .map(|(id, x, y)| (id.to_string(), Position::new(*x, *y)))
            .collect()
    }

    fn kind_at(world: &World, x: i32, y: i32) -> CellKind {
        world.grid().unwrap().get(Position::new(x, y)).unwrap().kind.clone()
    }

    #[test]
    fn state_before_init_is_rejected() {
        let mut world = World::new();
        let err = world.apply_state(&StateUpdate::default()).unwrap_err();
        assert_eq!(err, SyncError::NotInitialized);
    }

    #[test]
    fn init_rejects_walls_outside_the_grid_and_keeps_previous_grid() {
        let mut world = World::new();
        world.apply_init(&bordered(3, 3)).unwrap();

        let bad = GridInit {
            width: 2,
            height: 2,
            walls: vec![Position::new(5, 5)],
            exit: None,
        };
        assert!(matches!(
            world.apply_init(&bad),
            Err(SyncError::Grid(GridError::OutOfBounds { .. }))
        ));
        assert_eq!(world.grid().unwrap().width(), 3);
    }

    #[test]
    fn moving_player_vacates_previous_cell() {
        let mut world = World::new();
        world.apply_init(&bordered(5, 5)).unwrap();

        let first = StateUpdate {
            you: Some("p1".to_string()),
            players: players(&[("p1", 2, 2)]),
            ..Default::default()
        };
        world.apply_state(&first).unwrap();

        let second = StateUpdate {
            players: players(&[("p1", 2, 3)]),
            ..Default::default()
        };
        let dirty = world.apply_state(&second).unwrap();

        assert_eq!(
            dirty,
            DirtySet::from([Position::new(2, 2), Position::new(2, 3)])
        );
        assert_eq!(kind_at(&world, 2, 2), CellKind::Empty);
        assert_eq!(
            kind_at(&world, 2, 3),
            CellKind::Player {
                owner_id: "p1".to_string(),
                is_self: true
            }
        );
        assert_eq!(world.self_position(), Some(Position::new(2, 3)));
    }

    #[test]
    fn leaving_the_exit_restores_it() {
        let mut world = World::new();
        let mut init = bordered(5, 5);
        init.exit = Some(Position::new(3, 3));
        world.apply_init(&init).unwrap();

        world
            .apply_state(&StateUpdate {
                players: players(&[("p1", 3, 3)]),
                ..Default::default()
            })
            .unwrap();
        world
            .apply_state(&StateUpdate {
                players: players(&[("p1", 2, 3)]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(kind_at(&world, 3, 3), CellKind::Exit);
    }

    #[test]
    fn moved_treasure_vacates_its_old_cell() {
        let mut world = World::new();
        world.apply_init(&bordered(5, 5)).unwrap();

        let at = |x, y, collected| StateUpdate {
            treasure: Some(TreasureUpdate {
                pos: Position::new(x, y),
                collected,
            }),
            ..Default::default()
        };

        world.apply_state(&at(1, 1, false)).unwrap();
        let dirty = world.apply_state(&at(3, 1, false)).unwrap();
        assert_eq!(dirty.len(), 2);
        assert_eq!(kind_at(&world, 1, 1), CellKind::Empty);

        let dirty = world.apply_state(&at(3, 1, true)).unwrap();
        assert_eq!(dirty, DirtySet::from([Position::new(3, 1)]));
        assert_eq!(kind_at(&world, 3, 1), CellKind::Treasure { collected: true });
    }

    #[test]
    fn out_of_bounds_entity_leaves_grid_untouched() {
        let mut world = World::new();
        world.apply_init(&bordered(5, 5)).unwrap();
        let before = world.grid().unwrap().clone();

        let update = StateUpdate {
            players: players(&[("p1", 2, 2), ("p2", 9, 9)]),
            ..Default::default()
        };
        assert!(matches!(
            world.apply_state(&update),
            Err(SyncError::Grid(GridError::OutOfBounds { .. }))
        ));
        assert_eq!(world.grid().unwrap(), &before);
        assert!(world.registry().players().is_empty());
    }

    #[test]
    fn missing_you_keeps_remembered_identity() {
        let mut world = World::new();
        world.apply_init(&bordered(5, 5)).unwrap();
        world
            .apply_state(&StateUpdate {
                you: Some("p1".to_string()),
                players: players(&[("p1", 1, 1)]),
                ..Default::default()
            })
            .unwrap();
        world
            .apply_state(&StateUpdate {
                players: players(&[("p1", 1, 2)]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(world.you(), Some("p1"));
        assert!(matches!(
            kind_at(&world, 1, 2),
            CellKind::Player { is_self: true, .. }
        ));
    }

    #[test]
    fn absent_entities_are_not_despawned() {
        let mut world = World::new();
        world.apply_init(&bordered(5, 5)).unwrap();
        world
            .apply_state(&StateUpdate {
                enemies: players(&[("e1", 1, 1)]),
                ..Default::default()
            })
            .unwrap();
        let dirty = world.apply_state(&StateUpdate::default()).unwrap();

        assert!(dirty.is_empty());
        assert_eq!(
            world.registry().get(EntityKind::Enemy, "e1"),
            Some(Position::new(1, 1))
        );
        assert_eq!(
            kind_at(&world, 1, 1),
            CellKind::Enemy {
                id: "e1".to_string()
            }
        );
    }

    #[test]
    fn new_round_clears_entities_but_keeps_identity() {
        let mut world = World::new();
        world.apply_init(&bordered(5, 5)).unwrap();
        world
            .apply_state(&StateUpdate {
                you: Some("me".to_string()),
                players: players(&[("me", 1, 1)]),
                treasure: Some(TreasureUpdate {
                    pos: Position::new(3, 3),
                    collected: false,
                }),
                ..Default::default()
            })
            .unwrap();

        world.apply_init(&bordered(6, 4)).unwrap();

        assert_eq!(world.grid().unwrap().width(), 6);
        assert_eq!(kind_at(&world, 1, 1), CellKind::Empty);
        assert!(world.registry().players().is_empty());
        assert_eq!(world.treasure(), None);
        assert_eq!(world.you(), Some("me"));
        assert_eq!(world.self_position(), None);
    }
}
