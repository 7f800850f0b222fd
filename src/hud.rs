//! Text overlays beside the playfield: level and time on the left, mode on
//! the right.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::FONT_6X10,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{
        Baseline,
        Text,
    },
};
use heapless::String;

/// Displayed values, set when they change.
pub trait Hud {
    fn set_level(&mut self, level: u32);
    fn set_time_left(&mut self, secs: u32);
    fn set_mode(&mut self, name: &str);
}

/// `MM:SS`.
pub fn format_time(secs: u32) -> String<8> {
    let mut out = String::new();
    write!(out, "{:02}:{:02}", secs / 60, secs % 60).ok();
    out
}

/// One line of 6×10 text, vertically centered on `at.y`.
pub(crate) fn label<D>(target: &mut D, text: &str, at: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::with_baseline(text, at, style, Baseline::Middle).draw(target)?;
    Ok(())
}

// Label anchors, vertically centered on y.
const LEVEL_LABEL: Point = Point::new(2, 3);
const LEVEL_VALUE: Point = Point::new(2, 15);
const TIME_LABEL: Point = Point::new(2, 29);
const TIME_VALUE: Point = Point::new(2, 41);
const MODE_LABEL: Point = Point::new(98, 3);
const MODE_VALUE: Point = Point::new(98, 15);

/// HUD drawn with the 6×10 font into the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHud {
    level: String<8>,
    time: String<8>,
    mode: String<8>,
}

impl Default for TextHud {
    fn default() -> Self {
        Self::new()
    }
}

impl TextHud {
    pub fn new() -> Self {
        let mut hud = Self {
            level: String::new(),
            time: String::new(),
            mode: String::new(),
        };
        hud.level.push_str("1").ok();
        hud.time.push_str("10:00").ok();
        hud.mode.push_str("---").ok();
        hud
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for (text, at) in [
            ("Level", LEVEL_LABEL),
            (self.level.as_str(), LEVEL_VALUE),
            ("Time", TIME_LABEL),
            (self.time.as_str(), TIME_VALUE),
            ("Mode", MODE_LABEL),
            (self.mode.as_str(), MODE_VALUE),
        ] {
            label(target, text, at)?;
        }
        Ok(())
    }
}

impl Hud for TextHud {
    fn set_level(&mut self, level: u32) {
        self.level.clear();
        write!(self.level, "{level}").ok();
    }

    fn set_time_left(&mut self, secs: u32) {
        self.time = format_time(secs);
    }

    fn set_mode(&mut self, name: &str) {
        self.mode.clear();
        self.mode.push_str(name).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;

    #[test]
    fn time_is_minutes_and_seconds() {
        assert_eq!(format_time(600).as_str(), "10:00");
        assert_eq!(format_time(599).as_str(), "09:59");
        assert_eq!(format_time(61).as_str(), "01:01");
        assert_eq!(format_time(0).as_str(), "00:00");
    }

    #[test]
    fn setters_update_the_text() {
        let mut hud = TextHud::new();
        assert_eq!(hud.level(), "1");
        assert_eq!(hud.time(), "10:00");
        assert_eq!(hud.mode(), "---");

        hud.set_level(12);
        hud.set_time_left(75);
        hud.set_mode("Med");
        assert_eq!(hud.level(), "12");
        assert_eq!(hud.time(), "01:15");
        assert_eq!(hud.mode(), "Med");
    }

    #[test]
    fn draws_beside_the_playfield() {
        let mut fb = FrameBuffer::new();
        TextHud::new().draw(&mut fb).unwrap();
        assert!(fb.lit_count() > 0);
        // Nothing lands inside the board area.
        for x in 45..84 {
            for y in 1..63 {
                assert!(!fb.pixel(x, y), "({x}, {y})");
            }
        }
    }
}
