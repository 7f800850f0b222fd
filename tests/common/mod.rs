//! Simulated console for driving the async loops on the host.

#![allow(dead_code)]

use std::{
    cell::Cell,
    collections::VecDeque,
    convert::Infallible,
    rc::Rc,
};

use embassy_time::Instant;
use embedded_hal_async::delay::DelayNs;
use palette::Srgb;
use tiltris::{
    Clock,
    Config,
    Console,
    FrameBuffer,
    Indicator,
    InputSource,
    Panel,
    Tilt,
};

/// Microseconds since boot, advanced only by [`SimDelay`].
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn millis(&self) -> u64 {
        self.0.get() / 1000
    }

    fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

impl Clock for SimTime {
    fn now(&self) -> Instant {
        Instant::from_micros(self.0.get())
    }
}

pub struct SimDelay(pub SimTime);

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.advance_us(u64::from(ns) / 1000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.advance_us(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.advance_us(u64::from(ms) * 1000);
    }
}

/// Constant tilt, scripted encoder steps and a button that reads pressed
/// from a given time on.
pub struct FakeInput {
    pub time: SimTime,
    pub tilt: Tilt,
    pub turns: VecDeque<i8>,
    pub press_from_ms: Option<u64>,
    pub button_reads: usize,
}

impl InputSource for FakeInput {
    fn tilt(&mut self) -> Tilt {
        self.tilt
    }

    fn rotary_turn(&mut self, _now: Instant) -> i8 {
        self.turns.pop_front().unwrap_or(0)
    }

    fn button_pressed(&mut self) -> bool {
        self.button_reads += 1;
        self.turns.is_empty() && self.press_from_ms.is_some_and(|t| self.time.millis() >= t)
    }
}

/// Records every frame pushed and when.
pub struct FakePanel {
    pub time: SimTime,
    pub frames: usize,
    pub shown_at: Vec<u64>,
    pub last: Option<FrameBuffer>,
}

impl Panel for FakePanel {
    type Error = Infallible;

    fn show(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.frames += 1;
        self.shown_at.push(self.time.millis());
        self.last = Some(frame.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLed {
    pub colors: Vec<Srgb<u8>>,
}

impl Indicator for FakeLed {
    async fn set(&mut self, color: Srgb<u8>) {
        self.colors.push(color);
    }
}

pub type SimConsole = Console<FakeInput, FakePanel, FakeLed, SimTime, SimDelay>;

pub fn console(config: Config) -> SimConsole {
    let time = SimTime::default();
    let input = FakeInput {
        time: time.clone(),
        tilt: Tilt::default(),
        turns: VecDeque::new(),
        press_from_ms: None,
        button_reads: 0,
    };
    let panel = FakePanel {
        time: time.clone(),
        frames: 0,
        shown_at: Vec::new(),
        last: None,
    };
    Console::new(
        input,
        panel,
        FakeLed::default(),
        time.clone(),
        SimDelay(time),
        config,
    )
}
