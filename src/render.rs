//! The 128×64 one-bit raster and the playfield drawing.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
};

use crate::{
    BOARD_H,
    BOARD_W,
    Board,
    FallingPiece,
};

pub const SCREEN_W: u32 = 128;
pub const SCREEN_H: u32 = 64;

/// Pixel size of one board cell.
pub const CELL: i32 = 4;
/// Left edge of the playfield, centering it horizontally.
pub const BOARD_X: i32 = (SCREEN_W as i32 - BOARD_W as i32 * CELL) / 2;
pub const BOARD_PX_W: i32 = BOARD_W as i32 * CELL;
pub const BOARD_PX_H: i32 = BOARD_H as i32 * CELL;

/// One bit per pixel: row `y` is a `u128` with bit `x` set for column `x`.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [u128; SCREEN_H as usize],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit", &self.lit_count())
            .finish()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            rows: [0; SCREEN_H as usize],
        }
    }

    /// Pixels outside the screen read as off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).is_some_and(|(row, bit)| self.rows[row] & bit != 0)
    }

    /// Pixels outside the screen are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((row, bit)) = Self::locate(x, y) {
            if on {
                self.rows[row] |= bit;
            } else {
                self.rows[row] &= !bit;
            }
        }
    }

    pub fn lit_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    /// Every lit pixel, row by row.
    pub fn lit_pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, &row)| {
            (0..SCREEN_W as i32)
                .filter(move |&x| row >> x & 1 != 0)
                .map(move |x| Pixel(Point::new(x, y as i32), BinaryColor::On))
        })
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u128)> {
        if x < 0 || y < 0 || x >= SCREEN_W as i32 || y >= SCREEN_H as i32 {
            return None;
        }
        Some((y as usize, 1 << x))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_W, SCREEN_H)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.rows.fill(if color.is_on() { u128::MAX } else { 0 });
        Ok(())
    }
}

/// Pixels of the 4×4 tile for board cell (`gx`, `gy`), clipped to the screen.
fn tile(gx: i32, gy: i32) -> impl Iterator<Item = Pixel<BinaryColor>> {
    let (px, py) = (BOARD_X + gx * CELL, gy * CELL);
    (0..CELL)
        .flat_map(move |dx| (0..CELL).map(move |dy| Point::new(px + dx, py + dy)))
        .filter(|p| p.x >= 0 && p.y >= 0 && p.x < SCREEN_W as i32 && p.y < SCREEN_H as i32)
        .map(|p| Pixel(p, BinaryColor::On))
}

/// One-pixel frame around the playfield.
fn border() -> impl Iterator<Item = Pixel<BinaryColor>> {
    let left = BOARD_X;
    let right = BOARD_X + BOARD_PX_W;
    let bottom = BOARD_PX_H;
    let vertical = (0..bottom).flat_map(move |y| [Point::new(left, y), Point::new(right, y)]);
    let horizontal = (left..=right).flat_map(move |x| [Point::new(x, 0), Point::new(x, bottom - 1)]);
    vertical
        .chain(horizontal)
        .map(|p| Pixel(p, BinaryColor::On))
}

/// Draw settled blocks, the falling piece and the border.
///
/// The target is not cleared first.
pub fn draw_playfield<D>(target: &mut D, board: &Board, piece: &FallingPiece) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for (gy, row) in board.rows().iter().enumerate() {
        for (gx, _) in row.iter().enumerate().filter(|(_, filled)| **filled) {
            target.draw_iter(tile(gx as i32, gy as i32))?;
        }
    }

    let (ox, oy) = piece.position();
    for (dx, dy) in piece.shape().cells() {
        target.draw_iter(tile(ox + dx, oy + dy))?;
    }

    target.draw_iter(border())
}
