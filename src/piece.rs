//! The falling piece and the per-mode rotation rules.

use rand::{
    Rng,
    RngCore,
};

use crate::{
    Board,
    Error,
    RotationPolicy,
    Shape,
    ShapeKind,
};

/// Supplies the kind of each newly spawned piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> ShapeKind;
}

/// Uniformly random kinds, no bag.
#[derive(Debug, Clone)]
pub struct RandomPieces<R>(pub R);

impl<R: RngCore> PieceSource for RandomPieces<R> {
    fn next_kind(&mut self) -> ShapeKind {
        self.0.random()
    }
}

/// Which of the two orientations a `Toggle`-mode piece shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Original,
    Alternate,
}

impl Orientation {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Original => Self::Alternate,
            Self::Alternate => Self::Original,
        }
    }
}

/// Result of pressing the rotate button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Applied,
    /// The target orientation would collide; nothing changed.
    Blocked,
    /// The mode or the piece does not rotate.
    Disabled,
}

/// The piece under player control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallingPiece {
    kind: ShapeKind,
    shape: Shape,
    x: i32,
    y: i32,
    original: Shape,
    alternate: Shape,
    orientation: Orientation,
}

impl FallingPiece {
    /// A fresh piece in its canonical orientation with its top-left cell at
    /// (`x`, `y`).
    pub fn spawn(kind: ShapeKind, x: i32, y: i32) -> Self {
        let original = kind.shape();
        Self {
            kind,
            shape: original,
            x,
            y,
            original,
            alternate: original.rotate_cw(),
            orientation: Orientation::Original,
        }
    }

    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the piece collides where it stands.
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Move by (`dx`, `dy`) if the destination is free.
    pub fn try_shift(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        if board.collides(&self.shape, self.x + dx, self.y + dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Apply one rotate action under `policy`. Failed rotations never kick.
    pub fn rotate(&mut self, policy: RotationPolicy, board: &Board) -> Rotation {
        match policy {
            RotationPolicy::Free => {
                let turned = self.shape.rotate_cw();
                self.apply(board, turned, self.orientation)
            }
            RotationPolicy::Toggle => {
                if self.original == self.alternate {
                    return Rotation::Disabled;
                }
                let target = self.orientation.toggled();
                let shape = match target {
                    Orientation::Original => self.original,
                    Orientation::Alternate => self.alternate,
                };
                self.apply(board, shape, target)
            }
            RotationPolicy::Locked => Rotation::Disabled,
        }
    }

    /// Write the piece into the board.
    pub fn lock_into(&self, board: &mut Board) -> Result<(), Error> {
        board.place(&self.shape, self.x, self.y)
    }

    fn apply(&mut self, board: &Board, shape: Shape, orientation: Orientation) -> Rotation {
        if board.collides(&shape, self.x, self.y) {
            return Rotation::Blocked;
        }
        self.shape = shape;
        self.orientation = orientation;
        Rotation::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_rotation_cycles_through_four_orientations() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::J, 4, 4);
        let start = *piece.shape();
        for _ in 0..4 {
            assert_eq!(piece.rotate(RotationPolicy::Free, &board), Rotation::Applied);
        }
        assert_eq!(*piece.shape(), start);
    }

    #[test]
    fn free_rotation_is_dropped_against_a_wall() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::I, 0, 0);
        assert_eq!(piece.rotate(RotationPolicy::Free, &board), Rotation::Applied);
        assert!(piece.try_shift(&board, 9, 0));
        let vertical = *piece.shape();
        assert_eq!(piece.rotate(RotationPolicy::Free, &board), Rotation::Blocked);
        assert_eq!(*piece.shape(), vertical);
        assert_eq!(piece.position(), (9, 0));
    }

    #[test]
    fn toggle_returns_to_the_original_after_two_presses() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::T, 4, 4);
        let original = *piece.shape();
        assert_eq!(piece.rotate(RotationPolicy::Toggle, &board), Rotation::Applied);
        assert_eq!(piece.orientation(), Orientation::Alternate);
        assert_eq!(*piece.shape(), original.rotate_cw());
        assert_eq!(piece.rotate(RotationPolicy::Toggle, &board), Rotation::Applied);
        assert_eq!(piece.orientation(), Orientation::Original);
        assert_eq!(*piece.shape(), original);
    }

    #[test]
    fn toggle_never_reaches_a_third_orientation() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::L, 4, 4);
        let original = *piece.shape();
        for _ in 0..5 {
            piece.rotate(RotationPolicy::Toggle, &board);
            assert!(*piece.shape() == original || *piece.shape() == original.rotate_cw());
        }
    }

    #[test]
    fn blocked_toggle_leaves_the_piece_unchanged() {
        let mut board = Board::new();
        // I spawns horizontal at row 0; its vertical form would cover rows 0..4
        // in column 4.
        board.set(4, 2, true).unwrap();
        let mut piece = FallingPiece::spawn(ShapeKind::I, 4, 0);
        let before = piece.clone();
        assert_eq!(piece.rotate(RotationPolicy::Toggle, &board), Rotation::Blocked);
        assert_eq!(piece, before);
    }

    #[test]
    fn square_never_toggles() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::O, 4, 0);
        assert_eq!(piece.rotate(RotationPolicy::Toggle, &board), Rotation::Disabled);
        assert_eq!(piece.orientation(), Orientation::Original);
    }

    #[test]
    fn locked_policy_never_rotates() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::T, 4, 4);
        let before = piece.clone();
        assert_eq!(piece.rotate(RotationPolicy::Locked, &board), Rotation::Disabled);
        assert_eq!(piece, before);
    }

    #[test]
    fn shift_stops_at_the_floor() {
        let board = Board::new();
        let mut piece = FallingPiece::spawn(ShapeKind::O, 4, 0);
        let mut steps = 0;
        while piece.try_shift(&board, 0, 1) {
            steps += 1;
        }
        assert_eq!(steps, 14);
        assert_eq!(piece.position(), (4, 14));
    }
}
