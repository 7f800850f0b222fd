//! # tiltris
//!
//! A tilt-controlled falling-block puzzle for a small microcontroller
//! console:
//! - **Display**: 128×64 monochrome SSD1306 OLED over I2C
//! - **Tilt**: ADXL345 accelerometer; tilting sideways moves the piece,
//!   tilting towards the player drops it
//! - **Encoder**: rotary encoder for the menus, its push button rotates
//! - **Indicator**: one WS2812 RGB LED
//!
//! The engine ([`Session`]) is plain state driven by [`Session::tick`] and
//! knows nothing about devices. [`game::play`] runs it against a
//! [`game::Console`], and [`screens`] adds the intro, menu and game-over
//! screens around it. Board support for the ESP32-S3 lives in `hw` behind
//! the `esp32s3` feature.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut console = Console::new(controls, panel, neopixel, SystemClock, Delay, Config::default());
//! let mut rng = SmallRng::seed_from_u64(seed);
//! tiltris::screens::run_forever(&mut console, &mut rng).await;
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod adxl345;
mod board;
mod clock;
pub mod config;
mod error;
pub mod game;
pub mod hud;
pub mod indicator;
mod input;
mod mode;
pub mod oled;
mod piece;
pub mod render;
pub mod screens;
mod session;
mod shape;

#[cfg(feature = "esp32s3")]
pub mod hw;

pub use board::{
    BOARD_H,
    BOARD_W,
    Board,
};
pub use clock::{
    Clock,
    GameClock,
    SystemClock,
};
pub use config::Config;
pub use error::Error;
pub use game::{
    Console,
    Panel,
    play,
};
pub use indicator::{
    ColorCycle,
    Indicator,
};
pub use input::{
    Button,
    Controls,
    Encoder,
    InputSource,
    QuadratureDecoder,
    Tilt,
    TiltFilter,
    TiltSensor,
};
pub use mode::{
    Difficulty,
    RotationPolicy,
};
pub use piece::{
    FallingPiece,
    Orientation,
    PieceSource,
    RandomPieces,
    Rotation,
};
pub use render::{
    FrameBuffer,
    draw_playfield,
};
pub use session::{
    EndReason,
    Inputs,
    Outcome,
    Phase,
    RotationAction,
    Session,
    Tick,
};
pub use shape::{
    MAX_DIM,
    Shape,
    ShapeKind,
};
