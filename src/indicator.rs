//! The single RGB status LED.

use palette::Srgb;

/// Colors cycled through on every rotate action.
pub const ROTATION_COLORS: [Srgb<u8>; 7] = [
    Srgb::new(255, 0, 0),
    Srgb::new(255, 128, 0),
    Srgb::new(255, 255, 0),
    Srgb::new(0, 255, 0),
    Srgb::new(0, 255, 255),
    Srgb::new(0, 0, 255),
    Srgb::new(128, 0, 255),
];

/// Session running.
pub const GREEN: Srgb<u8> = Srgb::new(0, 255, 0);
/// Session over.
pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);
pub const OFF: Srgb<u8> = Srgb::new(0, 0, 0);

/// An RGB output, e.g. one WS2812.
#[allow(async_fn_in_trait)]
pub trait Indicator {
    async fn set(&mut self, color: Srgb<u8>);
}

/// Position in [`ROTATION_COLORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorCycle {
    index: usize,
}

impl ColorCycle {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// The color to show now; the following call returns the next one.
    pub fn advance(&mut self) -> Srgb<u8> {
        let color = ROTATION_COLORS[self.index];
        self.index = (self.index + 1) % ROTATION_COLORS.len();
        color
    }

    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Scale a color by a global brightness in `0.0..=1.0`.
pub fn scaled(color: Srgb<u8>, brightness: f32) -> Srgb<u8> {
    let linear: Srgb<f32> = color.into_format();
    (linear * brightness).into_format()
}
