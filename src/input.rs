//! Input filtering: smoothed tilt, debounced rotary encoder, active-low button.

use embassy_time::{
    Duration,
    Instant,
};
use embedded_hal::digital::InputPin;

use crate::Config;

/// Filtered acceleration along the board's x (left/right) and y
/// (towards/away from the player) axes, in m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

/// Exponential smoothing of raw accelerometer samples.
///
/// State is kept for the lifetime of the filter, across pieces and sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltFilter {
    alpha: f32,
    value: Tilt,
}

impl TiltFilter {
    pub const fn new(alpha: f32) -> Self {
        Self {
            alpha,
            value: Tilt { x: 0.0, y: 0.0 },
        }
    }

    /// `filtered = filtered * (1 - α) + raw * α` on both axes.
    pub fn update(&mut self, raw_x: f32, raw_y: f32) -> Tilt {
        let keep = 1.0 - self.alpha;
        self.value.x = self.value.x * keep + raw_x * self.alpha;
        self.value.y = self.value.y * keep + raw_y * self.alpha;
        self.value
    }

    pub const fn value(&self) -> Tilt {
        self.value
    }
}

/// A three-axis accelerometer returning calibrated readings in m/s².
pub trait TiltSensor {
    type Error;

    fn acceleration(&mut self) -> Result<[f32; 3], Self::Error>;
}

/// Debounced decoding of one quadrature phase.
///
/// Phase A is sampled every poll. A change arms the debounce window; once
/// A has been quiet for longer than the window and differs from the last
/// stable level, one step is emitted whose sign comes from phase B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureDecoder {
    last_a: bool,
    stable_a: bool,
    last_edge: Instant,
    debounce: Duration,
}

impl QuadratureDecoder {
    pub const fn new(level_a: bool, debounce: Duration) -> Self {
        Self {
            last_a: level_a,
            stable_a: level_a,
            last_edge: Instant::from_ticks(0),
            debounce,
        }
    }

    /// Feed one sample of phase A. `b` is read only when a step is emitted.
    ///
    /// Returns `1` (B high), `-1` (B low) or `0`.
    pub fn update(&mut self, now: Instant, a: bool, b: impl FnOnce() -> bool) -> i8 {
        if a != self.last_a {
            self.last_edge = now;
            self.last_a = a;
        }

        if now.saturating_duration_since(self.last_edge) > self.debounce && a != self.stable_a {
            self.stable_a = a;
            return if b() { 1 } else { -1 };
        }
        0
    }
}

/// Rotary encoder on two input pins.
pub struct Encoder<A, B> {
    a: A,
    b: B,
    decoder: QuadratureDecoder,
}

impl<A: InputPin, B: InputPin> Encoder<A, B> {
    pub fn new(mut a: A, b: B, debounce: Duration) -> Self {
        let level = a.is_high().unwrap_or(false);
        Self {
            a,
            b,
            decoder: QuadratureDecoder::new(level, debounce),
        }
    }

    /// One detent step, or `0`. A failed pin read counts as no edge.
    pub fn poll(&mut self, now: Instant) -> i8 {
        let Ok(a) = self.a.is_high() else {
            return 0;
        };
        let b = &mut self.b;
        self.decoder.update(now, a, || b.is_high().unwrap_or(false))
    }
}

/// Push button wired active low (pull-up, pressed pulls to ground).
pub struct Button<P> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// A failed read counts as released.
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}

/// Everything the game and the menus read from the player.
pub trait InputSource {
    /// Poll the accelerometer and return the smoothed tilt.
    fn tilt(&mut self) -> Tilt;

    /// Encoder steps since the last poll: `1`, `-1` or `0`.
    fn rotary_turn(&mut self, now: Instant) -> i8;

    fn button_pressed(&mut self) -> bool;
}

/// Accelerometer, encoder and button of the console.
pub struct Controls<T, A, B, K> {
    sensor: T,
    filter: TiltFilter,
    encoder: Encoder<A, B>,
    button: Button<K>,
}

impl<T, A, B, K> Controls<T, A, B, K>
where
    T: TiltSensor,
    A: InputPin,
    B: InputPin,
    K: InputPin,
{
    pub fn new(sensor: T, encoder_a: A, encoder_b: B, button: K, config: &Config) -> Self {
        Self {
            sensor,
            filter: TiltFilter::new(config.tilt_alpha),
            encoder: Encoder::new(encoder_a, encoder_b, config.encoder_debounce),
            button: Button::new(button),
        }
    }
}

impl<T, A, B, K> InputSource for Controls<T, A, B, K>
where
    T: TiltSensor,
    A: InputPin,
    B: InputPin,
    K: InputPin,
{
    fn tilt(&mut self) -> Tilt {
        match self.sensor.acceleration() {
            Ok([x, y, _]) => self.filter.update(x, y),
            Err(_) => {
                warn!("accelerometer read failed, keeping last tilt");
                self.filter.value()
            }
        }
    }

    fn rotary_turn(&mut self, now: Instant) -> i8 {
        self.encoder.poll(now)
    }

    fn button_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::VecDeque,
        rc::Rc,
    };

    use embedded_hal::digital::{
        ErrorKind,
        ErrorType,
    };

    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    /// Input pin whose level is set from the test. `None` makes reads fail.
    #[derive(Clone, Default)]
    struct FakePin {
        level: Rc<Cell<Option<bool>>>,
        reads: Rc<Cell<usize>>,
    }

    impl FakePin {
        fn at_level(level: bool) -> Self {
            let pin = Self::default();
            pin.set(Some(level));
            pin
        }

        fn set(&self, level: Option<bool>) {
            self.level.set(level);
        }
    }

    impl ErrorType for FakePin {
        type Error = ErrorKind;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.reads.set(self.reads.get() + 1);
            self.level.get().ok_or(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    struct FakeSensor(VecDeque<Result<[f32; 3], ()>>);

    impl TiltSensor for FakeSensor {
        type Error = ();

        fn acceleration(&mut self) -> Result<[f32; 3], Self::Error> {
            self.0.pop_front().unwrap_or(Err(()))
        }
    }

    #[test]
    fn filter_moves_a_quarter_of_the_way() {
        let mut filter = TiltFilter::new(0.25);
        let t = filter.update(4.0, -8.0);
        assert_eq!(t, Tilt { x: 1.0, y: -2.0 });
        let t = filter.update(4.0, -8.0);
        assert_eq!(t, Tilt { x: 1.75, y: -3.5 });
    }

    #[test]
    fn filter_converges_on_a_steady_reading() {
        let mut filter = TiltFilter::new(0.25);
        for _ in 0..60 {
            filter.update(2.0, -5.0);
        }
        let t = filter.value();
        assert!((t.x - 2.0).abs() < 1e-3);
        assert!((t.y + 5.0).abs() < 1e-3);
    }

    #[test]
    fn single_spike_stays_below_the_move_threshold() {
        let mut filter = TiltFilter::new(0.25);
        let t = filter.update(4.5, 0.0);
        assert!(t.x < 1.2);
    }

    #[test]
    fn decoder_waits_out_the_debounce_window() {
        let debounce = Duration::from_millis(3);
        let mut dec = QuadratureDecoder::new(false, debounce);
        assert_eq!(dec.update(at(100), true, || true), 0);
        assert_eq!(dec.update(at(102), true, || true), 0);
        assert_eq!(dec.update(at(103), true, || true), 0);
        assert_eq!(dec.update(at(104), true, || true), 1);
        // Already stable, no second event.
        assert_eq!(dec.update(at(110), true, || true), 0);
    }

    #[test]
    fn decoder_direction_follows_phase_b() {
        let debounce = Duration::from_millis(3);
        let mut dec = QuadratureDecoder::new(true, debounce);
        dec.update(at(100), false, || false);
        assert_eq!(dec.update(at(105), false, || false), -1);
        dec.update(at(200), true, || true);
        assert_eq!(dec.update(at(205), true, || true), 1);
    }

    #[test]
    fn decoder_rejects_bounce() {
        let debounce = Duration::from_millis(3);
        let mut dec = QuadratureDecoder::new(false, debounce);
        // Contact chatter that settles back where it started.
        for (ms, level) in [(100, true), (101, false), (102, true), (103, false)] {
            assert_eq!(dec.update(at(ms), level, || true), 0);
        }
        assert_eq!(dec.update(at(110), false, || true), 0);
    }

    #[test]
    fn decoder_emits_one_event_per_transition_after_chatter() {
        let debounce = Duration::from_millis(3);
        let mut dec = QuadratureDecoder::new(false, debounce);
        let mut events = 0;
        for (ms, level) in [(100, true), (101, false), (102, true), (110, true), (111, true)] {
            events += dec.update(at(ms), level, || false).abs();
        }
        assert_eq!(events, 1);
    }

    #[test]
    fn button_is_pressed_when_pulled_low() {
        let pin = FakePin::at_level(true);
        let mut button = Button::new(pin.clone());
        assert!(!button.is_pressed());

        pin.set(Some(false));
        assert!(button.is_pressed());

        pin.set(None);
        assert!(!button.is_pressed());
    }

    #[test]
    fn encoder_starts_from_the_current_phase() {
        let a = FakePin::at_level(true);
        let b = FakePin::at_level(false);
        let mut encoder = Encoder::new(a.clone(), b.clone(), Duration::from_millis(3));

        // A high since power-up is not a step.
        assert_eq!(encoder.poll(at(100)), 0);

        a.set(Some(false));
        assert_eq!(encoder.poll(at(200)), 0);
        assert_eq!(encoder.poll(at(202)), 0);
        assert_eq!(b.reads.get(), 0);
        assert_eq!(encoder.poll(at(204)), -1);
        assert_eq!(b.reads.get(), 1);

        a.set(Some(true));
        b.set(Some(true));
        assert_eq!(encoder.poll(at(300)), 0);
        assert_eq!(encoder.poll(at(304)), 1);
        assert_eq!(b.reads.get(), 2);
    }

    #[test]
    fn encoder_treats_a_failed_read_as_no_edge() {
        let a = FakePin::at_level(false);
        let b = FakePin::at_level(true);
        let mut encoder = Encoder::new(a.clone(), b.clone(), Duration::from_millis(3));

        a.set(None);
        for ms in [100, 104, 110] {
            assert_eq!(encoder.poll(at(ms)), 0);
        }
        assert_eq!(b.reads.get(), 0);

        // The decoder still holds the low phase from before the failure.
        a.set(Some(false));
        assert_eq!(encoder.poll(at(120)), 0);
        a.set(Some(true));
        assert_eq!(encoder.poll(at(130)), 0);
        assert_eq!(encoder.poll(at(134)), 1);
    }

    #[test]
    fn controls_keep_the_last_tilt_when_the_sensor_fails() {
        let sensor = FakeSensor(VecDeque::from([
            Ok([4.0, -8.0, 9.8]),
            Err(()),
            Ok([4.0, -8.0, 9.8]),
        ]));
        let button = FakePin::at_level(true);
        let mut controls = Controls::new(
            sensor,
            FakePin::at_level(false),
            FakePin::at_level(false),
            button.clone(),
            &Config::default(),
        );

        assert_eq!(controls.tilt(), Tilt { x: 1.0, y: -2.0 });
        assert_eq!(controls.tilt(), Tilt { x: 1.0, y: -2.0 });
        // Smoothing carries on from where it was.
        assert_eq!(controls.tilt(), Tilt { x: 1.75, y: -3.5 });

        assert!(!controls.button_pressed());
        button.set(Some(false));
        assert!(controls.button_pressed());
        assert_eq!(controls.rotary_turn(at(50)), 0);
    }
}
