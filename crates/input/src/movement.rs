//! Walkability-gated move planning.
//!
//! A move is only worth sending when the client knows where it stands and the
//! target cell can be entered. Everything else is dropped silently.

use crate::core::World;
use crate::types::Direction;

/// Decide whether a move in `dir` should be sent to the server.
pub fn plan_move(dir: Direction, world: &World) -> Option<Direction> {
    let grid = world.grid()?;
    let here = world.self_position()?;
    let target = here.step(dir);
    grid.is_walkable(target).then_some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridInit, StateUpdate};
    use crate::types::Position;

    fn world_with_self_at(x: i32, y: i32) -> World {
        let mut world = World::new();
        world
            .apply_init(&GridInit {
                width: 3,
                height: 3,
                walls: vec![Position::new(1, 0)],
                exit: None,
            })
            .unwrap();
        world
            .apply_state(&StateUpdate {
                you: Some("me".to_string()),
                players: vec![("me".to_string(), Position::new(x, y))],
                ..Default::default()
            })
            .unwrap();
        world
    }

    #[test]
    fn open_cell_is_allowed() {
        let world = world_with_self_at(1, 1);
        assert_eq!(plan_move(Direction::Down, &world), Some(Direction::Down));
        assert_eq!(plan_move(Direction::Left, &world), Some(Direction::Left));
    }

    #[test]
    fn wall_and_edge_are_rejected() {
        let world = world_with_self_at(1, 1);
        assert_eq!(plan_move(Direction::Up, &world), None);

        let world = world_with_self_at(2, 2);
        assert_eq!(plan_move(Direction::Right, &world), None);
        assert_eq!(plan_move(Direction::Down, &world), None);
    }

    #[test]
    fn unknown_self_position_discards_moves() {
        let mut world = World::new();
        assert_eq!(plan_move(Direction::Up, &world), None);

        world
            .apply_init(&GridInit {
                width: 3,
                height: 3,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(plan_move(Direction::Up, &world), None);
    }
}
