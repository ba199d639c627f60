//! Grid module - fixed-size 2-D container of cells
//!
//! Dimensions are chosen once at construction and never change afterwards.
//! Uses a flat vector in row-major order (`y * width + x`) for cache locality.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges
//! 0..height (top to bottom).

use thiserror::Error;

use crate::cell::{Cell, CellKind};
use crate::types::{Position, MAX_GRID_SIDE};

/// Contract violations of the grid model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds {
        pos: Position,
        width: i32,
        height: i32,
    },
}

/// The game grid, fully populated from construction on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a `width` x `height` grid with every cell `Empty`.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 || width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::empty(Position::new(x, y)));
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    fn out_of_bounds(&self, pos: Position) -> GridError {
        GridError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Fail with `OutOfBounds` unless `pos` is inside the grid.
    pub fn check(&self, pos: Position) -> Result<(), GridError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(self.out_of_bounds(pos))
        }
    }

    pub fn get(&self, pos: Position) -> Result<&Cell, GridError> {
        self.index(pos)
            .map(|idx| &self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Replace the cell at `pos`.
    pub fn set(&mut self, pos: Position, kind: CellKind) -> Result<(), GridError> {
        let idx = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        self.cells[idx] = Cell::new(pos, kind);
        Ok(())
    }

    /// Whether an entity may stand on `pos`. Out of bounds is never walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.index(pos)
            .map(|idx| self.cells[idx].is_walkable())
            .unwrap_or(false)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, `None` past the bottom edge.
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        Some(&self.cells[start..start + self.width as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty_at_own_coordinates() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.cells().len(), 12);
        for y in 0..3 {
            for x in 0..4 {
                let pos = Position::new(x, y);
                let cell = grid.get(pos).unwrap();
                assert_eq!(cell.pos, pos);
                assert_eq!(cell.kind, CellKind::Empty);
            }
        }
    }

    #[test]
    fn rejects_non_positive_and_oversized_dimensions() {
        for (w, h) in [(0, 5), (5, 0), (-1, 3), (MAX_GRID_SIDE + 1, 1)] {
            assert_eq!(
                Grid::new(w, h),
                Err(GridError::InvalidDimensions {
                    width: w,
                    height: h
                })
            );
        }
    }

    #[test]
    fn set_and_get_respect_bounds() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(Position::new(1, 1), CellKind::Wall).unwrap();
        assert_eq!(grid.get(Position::new(1, 1)).unwrap().kind, CellKind::Wall);

        let err = grid.set(Position::new(2, 0), CellKind::Wall).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                pos: Position::new(2, 0),
                width: 2,
                height: 2
            }
        );
        assert!(grid.get(Position::new(0, -1)).is_err());
    }

    #[test]
    fn walkability_is_total() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(Position::new(1, 1), CellKind::Wall).unwrap();

        assert!(grid.is_walkable(Position::new(0, 0)));
        assert!(!grid.is_walkable(Position::new(1, 1)));
        assert!(!grid.is_walkable(Position::new(-1, 0)));
        assert!(!grid.is_walkable(Position::new(3, 0)));
        assert!(!grid.is_walkable(Position::new(0, 3)));
    }

    #[test]
    fn row_slices_follow_row_major_layout() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(Position::new(2, 1), CellKind::Exit).unwrap();
        let row = grid.row(1).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[2].kind, CellKind::Exit);
        assert!(grid.row(2).is_none());
    }
}
