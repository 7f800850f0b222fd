//! Gameplay tunables.
//!
//! The constants are the stock values; [`Config`] gathers them so a session
//! (or a test) can override single entries with the `with_*` builders:
//!
//! ```rust
//! use embassy_time::Duration;
//! use tiltris::Config;
//!
//! let config = Config::default()
//!     .with_countdown_secs(90)
//!     .with_fast_drop_interval(Duration::from_millis(40));
//! assert_eq!(config.countdown_secs, 90);
//! ```

use embassy_time::Duration;

// ── Spawn ───────────────────────────────────────────────────────────────────
pub const SPAWN_X: i32 = 4;
pub const SPAWN_Y: i32 = 0;

// ── Tilt ────────────────────────────────────────────────────────────────────
/// Low-pass coefficient applied to every accelerometer sample.
pub const TILT_ALPHA: f32 = 0.25;
/// |filtered x| above this (m/s²) shifts the piece sideways.
pub const TILT_MOVE_THRESHOLD: f32 = 1.2;
/// Filtered y below this (m/s²) drops the piece one row.
pub const TILT_DROP_THRESHOLD: f32 = -3.0;
/// Minimum time between two sideways moves.
pub const MOVE_REPEAT: Duration = Duration::from_millis(100);
/// Minimum time between two fast-drop steps. Zero ties the rate to the loop.
pub const FAST_DROP_INTERVAL: Duration = Duration::from_millis(0);

// ── Encoder / button ────────────────────────────────────────────────────────
pub const ENCODER_DEBOUNCE: Duration = Duration::from_millis(3);
/// Pause after every rotate action so a held button does not spin the piece.
pub const ROTATION_PAUSE: Duration = Duration::from_millis(150);
/// Pause after confirming a menu or screen with the button.
pub const CONFIRM_PAUSE: Duration = Duration::from_millis(200);

// ── Timing ──────────────────────────────────────────────────────────────────
/// Session length.
pub const COUNTDOWN_SECS: u32 = 600;
/// Fall interval reduction per level.
pub const SPEED_STEP: Duration = Duration::from_millis(30);
/// Fastest fall interval.
pub const MIN_FALL_INTERVAL: Duration = Duration::from_millis(50);
/// Redraws are at least this far apart (20 fps).
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(50);
/// Sleep at the end of each tick (~100 Hz polling).
pub const IDLE_SLEEP: Duration = Duration::from_millis(10);
/// Frame time of the intro, menu and game-over screens.
pub const SCREEN_FRAME: Duration = Duration::from_millis(50);

// ── Indicator ───────────────────────────────────────────────────────────────
/// Global brightness applied to every indicator color.
pub const INDICATOR_BRIGHTNESS: f32 = 0.4;
pub const GAME_OVER_FLASHES: u8 = 3;
pub const GAME_OVER_FLASH: Duration = Duration::from_millis(200);

/// Session tunables, [`Config::DEFAULT`] unless overridden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub tilt_alpha: f32,
    pub tilt_move_threshold: f32,
    pub tilt_drop_threshold: f32,
    pub move_repeat: Duration,
    pub fast_drop_interval: Duration,
    pub encoder_debounce: Duration,
    pub rotation_pause: Duration,
    pub confirm_pause: Duration,
    pub countdown_secs: u32,
    pub speed_step: Duration,
    pub min_fall_interval: Duration,
    pub redraw_interval: Duration,
    pub idle_sleep: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Config {
    pub const DEFAULT: Self = Self {
        spawn_x: SPAWN_X,
        spawn_y: SPAWN_Y,
        tilt_alpha: TILT_ALPHA,
        tilt_move_threshold: TILT_MOVE_THRESHOLD,
        tilt_drop_threshold: TILT_DROP_THRESHOLD,
        move_repeat: MOVE_REPEAT,
        fast_drop_interval: FAST_DROP_INTERVAL,
        encoder_debounce: ENCODER_DEBOUNCE,
        rotation_pause: ROTATION_PAUSE,
        confirm_pause: CONFIRM_PAUSE,
        countdown_secs: COUNTDOWN_SECS,
        speed_step: SPEED_STEP,
        min_fall_interval: MIN_FALL_INTERVAL,
        redraw_interval: REDRAW_INTERVAL,
        idle_sleep: IDLE_SLEEP,
    };

    /// Fall interval one level later: `max(min_fall_interval, interval - speed_step)`.
    pub fn next_fall_interval(&self, interval: Duration) -> Duration {
        interval
            .checked_sub(self.speed_step)
            .unwrap_or(Duration::from_ticks(0))
            .max(self.min_fall_interval)
    }

    #[must_use]
    pub const fn with_spawn(mut self, x: i32, y: i32) -> Self {
        self.spawn_x = x;
        self.spawn_y = y;
        self
    }

    #[must_use]
    pub const fn with_tilt_alpha(mut self, alpha: f32) -> Self {
        self.tilt_alpha = alpha;
        self
    }

    #[must_use]
    pub const fn with_tilt_thresholds(mut self, sideways: f32, drop: f32) -> Self {
        self.tilt_move_threshold = sideways;
        self.tilt_drop_threshold = drop;
        self
    }

    #[must_use]
    pub const fn with_move_repeat(mut self, repeat: Duration) -> Self {
        self.move_repeat = repeat;
        self
    }

    #[must_use]
    pub const fn with_fast_drop_interval(mut self, interval: Duration) -> Self {
        self.fast_drop_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_encoder_debounce(mut self, debounce: Duration) -> Self {
        self.encoder_debounce = debounce;
        self
    }

    #[must_use]
    pub const fn with_rotation_pause(mut self, pause: Duration) -> Self {
        self.rotation_pause = pause;
        self
    }

    #[must_use]
    pub const fn with_countdown_secs(mut self, secs: u32) -> Self {
        self.countdown_secs = secs;
        self
    }

    #[must_use]
    pub const fn with_speed_curve(mut self, step: Duration, floor: Duration) -> Self {
        self.speed_step = step;
        self.min_fall_interval = floor;
        self
    }

    #[must_use]
    pub const fn with_redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_idle_sleep(mut self, sleep: Duration) -> Self {
        self.idle_sleep = sleep;
        self
    }
}
