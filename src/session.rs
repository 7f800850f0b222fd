//! One game from spawn to game over.
//!
//! [`Session::tick`] is the whole per-iteration update. It reads the already
//! filtered inputs, moves and rotates the piece, runs the countdown and the
//! fall timer, and reports what the caller has to show. It never touches a
//! device and never sleeps, so the async runner in [`crate::game`] and the
//! tests drive it the same way.

use embassy_time::{
    Duration,
    Instant,
};
use palette::Srgb;

use crate::{
    Board,
    ColorCycle,
    Config,
    Difficulty,
    FallingPiece,
    GameClock,
    PieceSource,
    Rotation,
    Tilt,
};

/// Inputs sampled for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Inputs {
    pub tilt: Tilt,
    pub button: bool,
}

/// Where the session is in its spawn / fall / lock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Spawning,
    Active,
    Locking,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndReason {
    /// The countdown reached zero.
    TimeUp,
    /// A new piece collided where it spawns.
    BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    pub level: u32,
    pub reason: EndReason,
}

/// A rotate action and the indicator color it advanced to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAction {
    pub result: Rotation,
    pub color: Srgb<u8>,
}

/// What changed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// Redraw the playfield now.
    pub redraw: bool,
    /// The button was handled; the caller shows the color and pauses.
    pub rotation: Option<RotationAction>,
    /// New level, after a line clear.
    pub level: Option<u32>,
    /// New countdown value in seconds.
    pub time_left: Option<u32>,
    pub lines_cleared: usize,
    /// Set on the tick the session ends and on every tick after.
    pub outcome: Option<Outcome>,
}

pub struct Session<P> {
    config: Config,
    difficulty: Difficulty,
    board: Board,
    piece: FallingPiece,
    pieces: P,
    phase: Phase,
    level: u32,
    fall_interval: Duration,
    time_left: u32,
    clock: GameClock,
    last_move: Option<Instant>,
    last_drop: Option<Instant>,
    colors: ColorCycle,
    dirty: bool,
    outcome: Option<Outcome>,
}

impl<P: PieceSource> Session<P> {
    /// Start a session on an empty board and spawn the first piece.
    pub fn new(
        difficulty: Difficulty,
        fall_interval: Duration,
        config: Config,
        mut pieces: P,
        now: Instant,
    ) -> Self {
        let piece = FallingPiece::spawn(pieces.next_kind(), config.spawn_x, config.spawn_y);
        let mut session = Self {
            config,
            difficulty,
            board: Board::new(),
            piece,
            pieces,
            phase: Phase::Spawning,
            level: 1,
            fall_interval,
            time_left: config.countdown_secs,
            clock: GameClock::new(now, fall_interval),
            last_move: None,
            last_drop: None,
            colors: ColorCycle::new(),
            dirty: true,
            outcome: None,
        };
        session.settle_spawn();
        info!(
            "session started: {} mode, fall every {} ms",
            difficulty.name(),
            fall_interval.as_millis()
        );
        session
    }

    /// Replace the (empty) starting board, e.g. for a prepared puzzle.
    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self.phase = Phase::Spawning;
        self.outcome = None;
        self.settle_spawn();
        self
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn piece(&self) -> &FallingPiece {
        &self.piece
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn level(&self) -> u32 {
        self.level
    }

    pub const fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    /// Countdown in whole seconds.
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    /// Advance the game to `now`.
    pub fn tick(&mut self, now: Instant, inputs: &Inputs) -> Tick {
        let mut tick = Tick::default();
        if self.is_over() {
            tick.outcome = self.outcome;
            return tick;
        }

        self.shift_sideways(now, inputs.tilt);
        self.fast_drop(now, inputs.tilt);

        if inputs.button {
            let result = self.piece.rotate(self.difficulty.rotation(), &self.board);
            if result == Rotation::Applied {
                self.dirty = true;
            }
            tick.rotation = Some(RotationAction {
                result,
                color: self.colors.advance(),
            });
        }

        if self.clock.take_second(now) {
            self.time_left = self.time_left.saturating_sub(1);
            tick.time_left = Some(self.time_left);
            // The HUD countdown is part of the frame.
            self.dirty = true;
            if self.time_left == 0 {
                self.finish(EndReason::TimeUp);
                tick.outcome = self.outcome;
                return tick;
            }
        }

        if self.clock.fall_due(now) {
            if !self.piece.try_shift(&self.board, 0, 1) {
                self.phase = Phase::Locking;
                let cleared = self.lock();
                tick.lines_cleared = cleared;
                if cleared > 0 {
                    tick.level = Some(self.level);
                }
                self.spawn();
                if self.is_over() {
                    tick.outcome = self.outcome;
                    return tick;
                }
            }
            self.dirty = true;
            self.clock.restart_fall(now, self.fall_interval);
        }

        if self.dirty && self.clock.redraw_allowed(now) {
            self.dirty = false;
            self.clock.mark_redraw(now, self.config.redraw_interval);
            tick.redraw = true;
        }

        tick
    }

    fn shift_sideways(&mut self, now: Instant, tilt: Tilt) {
        if let Some(last) = self.last_move
            && now.saturating_duration_since(last) <= self.config.move_repeat
        {
            return;
        }
        let dx = if tilt.x < -self.config.tilt_move_threshold {
            -1
        } else if tilt.x > self.config.tilt_move_threshold {
            1
        } else {
            return;
        };
        if self.piece.try_shift(&self.board, dx, 0) {
            self.last_move = Some(now);
            self.dirty = true;
        }
    }

    fn fast_drop(&mut self, now: Instant, tilt: Tilt) {
        if tilt.y >= self.config.tilt_drop_threshold {
            return;
        }
        if let Some(last) = self.last_drop
            && now.saturating_duration_since(last) < self.config.fast_drop_interval
        {
            return;
        }
        if self.piece.try_shift(&self.board, 0, 1) {
            self.last_drop = Some(now);
            self.clock.restart_fall(now, self.fall_interval);
            self.dirty = true;
        }
    }

    /// Settle the piece into the board and clear lines. Returns the number
    /// of rows removed.
    fn lock(&mut self) -> usize {
        if let Err(e) = self.piece.lock_into(&mut self.board) {
            error!("piece could not be locked: {}", e);
            self.finish(EndReason::BoardFull);
            return 0;
        }

        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.level += 1;
            self.fall_interval = self.config.next_fall_interval(self.fall_interval);
            info!(
                "cleared {} lines, level {}, fall every {} ms",
                cleared,
                self.level,
                self.fall_interval.as_millis()
            );
        }
        cleared
    }

    fn spawn(&mut self) {
        if self.is_over() {
            return;
        }
        self.phase = Phase::Spawning;
        let kind = self.pieces.next_kind();
        self.piece = FallingPiece::spawn(kind, self.config.spawn_x, self.config.spawn_y);
        self.dirty = true;
        self.settle_spawn();
    }

    fn settle_spawn(&mut self) {
        if self.piece.collides(&self.board) {
            self.finish(EndReason::BoardFull);
        } else {
            self.phase = Phase::Active;
        }
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = Phase::GameOver;
        self.outcome = Some(Outcome {
            level: self.level,
            reason,
        });
        info!("session over at level {}: {}", self.level, reason);
    }
}
