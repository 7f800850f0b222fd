//! Screens around a session: intro, difficulty menu and game over.

use core::fmt::Write as _;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
};
use embedded_hal_async::delay::DelayNs;
use rand::Rng;

use crate::{
    Clock,
    ColorCycle,
    Difficulty,
    Indicator,
    InputSource,
    RandomPieces,
    config::{
        GAME_OVER_FLASH,
        GAME_OVER_FLASHES,
        SCREEN_FRAME,
    },
    game::{
        Console,
        Panel,
        play,
    },
    hud::label,
    indicator::{
        OFF,
        RED,
    },
    render::SCREEN_H,
};

const INTRO_BLOCKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FallingBlock {
    x: i32,
    /// Top edge in half pixels.
    y2: i32,
    /// Half pixels per frame.
    speed: i32,
    size: u32,
}

impl FallingBlock {
    fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            x: rng.random_range(1..=10) * 10,
            y2: -2 * rng.random_range(0..=30),
            speed: rng.random_range(1..=3),
            size: rng.random_range(3..=5),
        }
    }

    fn top(&self) -> i32 {
        self.y2 / 2
    }
}

/// Squares drifting down the intro screen, respawning above the top once
/// they leave the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroAnimation {
    blocks: [FallingBlock; INTRO_BLOCKS],
}

impl IntroAnimation {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            blocks: core::array::from_fn(|_| FallingBlock::random(rng)),
        }
    }

    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        for block in &mut self.blocks {
            block.y2 += block.speed;
            if block.top() > SCREEN_H as i32 {
                block.y2 = -2 * rng.random_range(5..=15);
                block.x = rng.random_range(1..=10) * 10;
            }
        }
    }

    /// Top-left corners of the blocks in pixels.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.blocks.iter().map(|b| Point::new(b.x, b.top()))
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = PrimitiveStyle::with_fill(BinaryColor::On);
        for block in &self.blocks {
            Rectangle::new(Point::new(block.x, block.top()), Size::new_equal(block.size))
                .into_styled(style)
                .draw(target)?;
        }
        Ok(())
    }
}

/// Cursor over [`Difficulty::ALL`]; wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DifficultyMenu {
    index: usize,
}

impl DifficultyMenu {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    pub const fn selected(&self) -> Difficulty {
        Difficulty::ALL[self.index]
    }

    /// Move by one encoder step (`1`, `-1` or `0`).
    pub fn turn(&mut self, step: i8) {
        let len = Difficulty::ALL.len();
        self.index = match step {
            1 => (self.index + 1) % len,
            -1 => (self.index + len - 1) % len,
            _ => self.index,
        };
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        label(target, "Select Difficulty:", Point::new(5, 8))?;
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let marker = if i == self.index { "> " } else { "  " };
            let mut line = heapless::String::<8>::new();
            write!(line, "{marker}{}", difficulty.name()).ok();
            label(target, &line, Point::new(15, 26 + 12 * i as i32))?;
        }
        Ok(())
    }
}

/// Animate until the button is pressed, cycling the indicator through the
/// rotation colors.
pub async fn intro<I, P, L, C, D, R>(console: &mut Console<I, P, L, C, D>, rng: &mut R)
where
    I: InputSource,
    P: Panel,
    L: Indicator,
    C: Clock,
    D: DelayNs,
    R: Rng,
{
    let mut animation = IntroAnimation::new(rng);
    let mut colors = ColorCycle::new();
    loop {
        let frame = console.blank_frame();
        let Ok(()) = animation.draw(frame);
        let Ok(()) = label(frame, "BLOCK PUZZLE", Point::new(30, 30));
        let Ok(()) = label(frame, "Press to Start", Point::new(26, 50));
        console.present();

        animation.advance(rng);
        console.light(colors.advance()).await;

        if console.input.button_pressed() {
            console.pause(console.config.confirm_pause).await;
            return;
        }
        console.pause(SCREEN_FRAME).await;
    }
}

/// Pick a difficulty with the encoder, confirm with the button.
pub async fn choose_difficulty<I, P, L, C, D>(console: &mut Console<I, P, L, C, D>) -> Difficulty
where
    I: InputSource,
    P: Panel,
    L: Indicator,
    C: Clock,
    D: DelayNs,
{
    let mut menu = DifficultyMenu::new();
    loop {
        let Ok(()) = menu.draw(console.blank_frame());
        console.present();

        let now = console.clock.now();
        menu.turn(console.input.rotary_turn(now));

        if console.input.button_pressed() {
            let choice = menu.selected();
            info!("difficulty: {}", choice.name());
            console.pause(console.config.confirm_pause).await;
            return choice;
        }
        console.pause(SCREEN_FRAME).await;
    }
}

/// Flash red, show the level reached and wait for the button. The indicator
/// is switched off on the way out.
pub async fn game_over<I, P, L, C, D>(console: &mut Console<I, P, L, C, D>, level: u32)
where
    I: InputSource,
    P: Panel,
    L: Indicator,
    C: Clock,
    D: DelayNs,
{
    for _ in 0..GAME_OVER_FLASHES {
        console.light(RED).await;
        console.pause(GAME_OVER_FLASH).await;
        console.light(OFF).await;
        console.pause(GAME_OVER_FLASH).await;
    }
    console.light(RED).await;

    let mut line = heapless::String::<16>::new();
    write!(line, "Level: {level}").ok();
    let frame = console.blank_frame();
    let Ok(()) = label(frame, "GAME OVER", Point::new(32, 20));
    let Ok(()) = label(frame, &line, Point::new(40, 36));
    let Ok(()) = label(frame, "Press to Restart", Point::new(14, 52));
    console.present();

    while !console.input.button_pressed() {
        console.pause(SCREEN_FRAME).await;
    }
    console.light(OFF).await;
}

/// Intro, menu, session, game over, forever.
pub async fn run_forever<I, P, L, C, D, R>(console: &mut Console<I, P, L, C, D>, rng: &mut R)
where
    I: InputSource,
    P: Panel,
    L: Indicator,
    C: Clock,
    D: DelayNs,
    R: Rng,
{
    loop {
        intro(console, rng).await;
        let difficulty = choose_difficulty(console).await;
        let outcome = play(
            console,
            difficulty,
            difficulty.fall_interval(),
            RandomPieces(&mut *rng),
        )
        .await;
        info!("game over at level {}: {}", outcome.level, outcome.reason);
        game_over(console, outcome.level).await;
    }
}
