//! Tetromino shapes as small boolean matrices.

use rand::{
    Rng,
    distr::{
        Distribution,
        StandardUniform,
    },
};

use crate::Error;

/// Largest row or column count of any shape, in any orientation.
pub const MAX_DIM: usize = 4;

/// A rectangular matrix of filled/empty cells, at most 4×4.
///
/// Cells outside `rows` × `cols` are always empty, so two shapes compare equal
/// exactly when their dimensions and filled cells match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

impl Shape {
    /// Build a shape from a `0`/`1` matrix, row by row.
    pub const fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0 && R <= MAX_DIM && C <= MAX_DIM);
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        let mut row = 0;
        while row < R {
            let mut col = 0;
            while col < C {
                cells[row][col] = matrix[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether the cell at `row`, `col` is filled.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, Error> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::ShapeIndex { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// Filled cells as `(column, row)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let Self { rows, cols, cells } = *self;
        (0..rows as usize).flat_map(move |row| {
            (0..cols as usize).filter_map(move |col| cells[row][col].then_some((col as i32, row as i32)))
        })
    }

    /// Rotate 90° clockwise: `new[i][j] = old[rows - 1 - j][i]`.
    ///
    /// An R×C shape becomes C×R.
    #[must_use]
    pub fn rotate_cw(&self) -> Self {
        let (rows, cols) = (self.rows(), self.cols());
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, cell) in out_row.iter_mut().enumerate().take(rows) {
                *cell = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [Self::I, Self::O, Self::T, Self::L, Self::J, Self::S, Self::Z];

    /// Canonical spawn orientation.
    pub const fn shape(self) -> Shape {
        match self {
            Self::I => Shape::from_matrix([[1, 1, 1, 1]]),
            Self::O => Shape::from_matrix([[1, 1], [1, 1]]),
            Self::T => Shape::from_matrix([[1, 1, 1], [0, 1, 0]]),
            Self::L => Shape::from_matrix([[1, 0], [1, 0], [1, 1]]),
            Self::J => Shape::from_matrix([[0, 1], [0, 1], [1, 1]]),
            Self::S => Shape::from_matrix([[0, 1, 1], [1, 1, 0]]),
            Self::Z => Shape::from_matrix([[1, 1, 0], [0, 1, 1]]),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::O => "O",
            Self::T => "T",
            Self::L => "L",
            Self::J => "J",
            Self::S => "S",
            Self::Z => "Z",
        }
    }
}

/// Uniform choice over the seven kinds.
impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())]
    }
}
