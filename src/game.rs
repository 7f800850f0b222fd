//! The cooperative game loop.
//!
//! [`play`] owns one [`Session`] and drives it from the console's devices:
//! sample inputs, tick, push HUD values, redraw the panel when asked to,
//! light the indicator, then sleep. Every wait goes through the console's
//! [`DelayNs`], so the same loop runs on `embassy_time::Delay` on the device
//! and on a simulated clock in tests.

use embassy_time::Duration;
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
};
use embedded_hal_async::delay::DelayNs;
use palette::Srgb;

use crate::{
    Clock,
    Config,
    Difficulty,
    FrameBuffer,
    Indicator,
    InputSource,
    Inputs,
    Outcome,
    PieceSource,
    Session,
    config::INDICATOR_BRIGHTNESS,
    draw_playfield,
    hud::{
        Hud,
        TextHud,
    },
    indicator::{
        GREEN,
        scaled,
    },
};

/// A one-bit display that shows whole frames.
pub trait Panel {
    type Error;

    fn show(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

/// Everything the game talks to, plus the frame and HUD it draws.
pub struct Console<I, P, L, C, D> {
    pub input: I,
    pub panel: P,
    pub indicator: L,
    pub clock: C,
    pub delay: D,
    pub config: Config,
    frame: FrameBuffer,
    hud: TextHud,
}

impl<I, P, L, C, D> Console<I, P, L, C, D>
where
    I: InputSource,
    P: Panel,
    L: Indicator,
    C: Clock,
    D: DelayNs,
{
    pub fn new(input: I, panel: P, indicator: L, clock: C, delay: D, config: Config) -> Self {
        Self {
            input,
            panel,
            indicator,
            clock,
            delay,
            config,
            frame: FrameBuffer::new(),
            hud: TextHud::new(),
        }
    }

    /// The last frame handed to the panel.
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub const fn hud(&self) -> &TextHud {
        &self.hud
    }

    /// Blank working frame for a screen to draw into before [`present`].
    ///
    /// [`present`]: Self::present
    pub(crate) fn blank_frame(&mut self) -> &mut FrameBuffer {
        let Ok(()) = self.frame.clear(BinaryColor::Off);
        &mut self.frame
    }

    /// Push the working frame. Panel errors are logged and dropped.
    pub(crate) fn present(&mut self) {
        if self.panel.show(&self.frame).is_err() {
            warn!("panel update failed");
        }
    }

    /// Show `color` at the global indicator brightness.
    pub(crate) async fn light(&mut self, color: Srgb<u8>) {
        self.indicator.set(scaled(color, INDICATOR_BRIGHTNESS)).await;
    }

    pub(crate) async fn pause(&mut self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        self.delay.delay_ms(ms).await;
    }

    fn redraw<S: PieceSource>(&mut self, session: &Session<S>) {
        let Ok(()) = self.frame.clear(BinaryColor::Off);
        let Ok(()) = draw_playfield(&mut self.frame, session.board(), session.piece());
        let Ok(()) = self.hud.draw(&mut self.frame);
        self.present();
    }
}

/// Run one session until it ends and return how it ended.
///
/// The indicator turns green at the start. It is left at the last rotation
/// color when the session ends; the game-over screen takes over from there.
pub async fn play<I, P, L, C, D, S>(
    console: &mut Console<I, P, L, C, D>,
    difficulty: Difficulty,
    fall_interval: Duration,
    pieces: S,
) -> Outcome
where
    I: InputSource,
    P: Panel,
    L: Indicator,
    C: Clock,
    D: DelayNs,
    S: PieceSource,
{
    let config = console.config;
    console.light(GREEN).await;
    console.hud.set_mode(difficulty.name());
    console.hud.set_level(1);
    console.hud.set_time_left(config.countdown_secs);

    let mut session = Session::new(difficulty, fall_interval, config, pieces, console.clock.now());

    loop {
        let inputs = Inputs {
            tilt: console.input.tilt(),
            button: console.input.button_pressed(),
        };
        let tick = session.tick(console.clock.now(), &inputs);

        if let Some(level) = tick.level {
            console.hud.set_level(level);
        }
        if let Some(secs) = tick.time_left {
            console.hud.set_time_left(secs);
        }

        if tick.redraw || tick.outcome.is_some() {
            console.redraw(&session);
        }

        if let Some(outcome) = tick.outcome {
            return outcome;
        }

        if let Some(action) = tick.rotation {
            debug!("rotate: {}", action.result);
            console.light(action.color).await;
            console.pause(config.rotation_pause).await;
        }

        console.pause(config.idle_sleep).await;
    }
}
