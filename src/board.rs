//! The settled-block grid.
//!
//! Row 0 is the top of the playfield. Pieces may hang above it (negative
//! rows) while spawning; those cells are bounds-checked against the walls and
//! the floor only, never against stored contents.

use crate::{
    Error,
    Shape,
};

/// Playfield width in cells.
pub const BOARD_W: usize = 10;
/// Playfield height in cells.
pub const BOARD_H: usize = 16;

/// Fixed `BOARD_H` × `BOARD_W` occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[bool; BOARD_W]; BOARD_H],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const fn new() -> Self {
        Self {
            cells: [[false; BOARD_W]; BOARD_H],
        }
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.cells = [[false; BOARD_W]; BOARD_H];
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> &[[bool; BOARD_W]; BOARD_H] {
        &self.cells
    }

    pub fn is_filled(&self, x: i32, y: i32) -> Result<bool, Error> {
        let (col, row) = Self::index(x, y)?;
        Ok(self.cells[row][col])
    }

    pub fn set(&mut self, x: i32, y: i32, filled: bool) -> Result<(), Error> {
        let (col, row) = Self::index(x, y)?;
        self.cells[row][col] = filled;
        Ok(())
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// Whether `shape` placed with its top-left cell at (`ox`, `oy`) hits a
    /// wall, the floor, or a settled block.
    pub fn collides(&self, shape: &Shape, ox: i32, oy: i32) -> bool {
        shape.cells().any(|(dx, dy)| {
            let (x, y) = (ox + dx, oy + dy);
            if x < 0 || x >= BOARD_W as i32 || y >= BOARD_H as i32 {
                return true;
            }
            y >= 0 && self.cells[y as usize][x as usize]
        })
    }

    /// Mark every filled cell of `shape` as occupied.
    ///
    /// Does not check for overlap; callers test [`collides`](Self::collides)
    /// first. A cell outside the grid leaves the board untouched.
    pub fn place(&mut self, shape: &Shape, ox: i32, oy: i32) -> Result<(), Error> {
        for (dx, dy) in shape.cells() {
            Self::index(ox + dx, oy + dy)?;
        }
        for (dx, dy) in shape.cells() {
            self.cells[(oy + dy) as usize][(ox + dx) as usize] = true;
        }
        Ok(())
    }

    /// Remove every full row, drop the rows above it, and return how many
    /// rows were removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut write = BOARD_H;
        for read in (0..BOARD_H).rev() {
            if self.cells[read].iter().all(|&c| c) {
                continue;
            }
            write -= 1;
            self.cells[write] = self.cells[read];
        }
        for row in &mut self.cells[..write] {
            *row = [false; BOARD_W];
        }
        write
    }

    fn index(x: i32, y: i32) -> Result<(usize, usize), Error> {
        if x < 0 || x >= BOARD_W as i32 || y < 0 || y >= BOARD_H as i32 {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok((x as usize, y as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeKind;

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..BOARD_W as i32 {
            board.set(x, y, true).unwrap();
        }
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::new();
        let i = ShapeKind::I.shape();
        assert!(!board.collides(&i, 0, 0));
        assert!(!board.collides(&i, 6, 15));
        assert!(board.collides(&i, -1, 0));
        assert!(board.collides(&i, 7, 0));
        assert!(board.collides(&i, 0, 16));
    }

    #[test]
    fn rows_above_the_board_are_free() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        let l = ShapeKind::L.shape();
        // Bottom row of the L sits at y = -1, fully above the grid.
        assert!(!board.collides(&l, 3, -3));
        // One step lower it reaches the filled top row.
        assert!(board.collides(&l, 3, -2));
    }

    #[test]
    fn settled_cells_collide() {
        let mut board = Board::new();
        board.set(5, 10, true).unwrap();
        let o = ShapeKind::O.shape();
        assert!(board.collides(&o, 4, 9));
        assert!(board.collides(&o, 5, 10));
        assert!(!board.collides(&o, 6, 9));
        assert!(!board.collides(&o, 4, 7));
    }

    #[test]
    fn place_marks_cells() {
        let mut board = Board::new();
        let t = ShapeKind::T.shape();
        board.place(&t, 2, 14).unwrap();
        assert_eq!(board.filled_count(), 4);
        assert_eq!(board.is_filled(2, 14), Ok(true));
        assert_eq!(board.is_filled(3, 15), Ok(true));
        assert_eq!(board.is_filled(2, 15), Ok(false));
    }

    #[test]
    fn place_outside_the_grid_is_rejected_without_writing() {
        let mut board = Board::new();
        let i = ShapeKind::I.shape();
        assert_eq!(board.place(&i, 8, 0), Err(Error::OutOfBounds { x: 10, y: 0 }));
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.place(&i, 0, -1), Err(Error::OutOfBounds { x: 0, y: -1 }));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn clear_lines_compacts_and_keeps_order() {
        let mut board = Board::new();
        board.set(0, 12, true).unwrap();
        fill_row(&mut board, 13);
        board.set(1, 14, true).unwrap();
        fill_row(&mut board, 15);

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.is_filled(0, 14), Ok(true));
        assert_eq!(board.is_filled(1, 15), Ok(true));
        assert!(board.rows()[..14].iter().flatten().all(|&c| !c));
    }

    #[test]
    fn clear_lines_without_full_rows_is_a_no_op() {
        let mut board = Board::new();
        board.set(3, 15, true).unwrap();
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut board = Board::new();
        assert_eq!(board.is_filled(10, 0), Err(Error::OutOfBounds { x: 10, y: 0 }));
        assert_eq!(board.set(0, 16, true), Err(Error::OutOfBounds { x: 0, y: 16 }));
    }
}
