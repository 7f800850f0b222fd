//! SSD1306 128×64 OLED on I2C, driven through the `ssd1306` crate in
//! buffered graphics mode.

use display_interface::DisplayError;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::I2c;
use ssd1306::{
    I2CDisplayInterface,
    Ssd1306,
    mode::BufferedGraphicsMode,
    prelude::{
        Brightness,
        DisplayConfig,
        DisplayRotation,
        DisplaySize128x64,
        I2CInterface,
    },
};

use crate::{
    FrameBuffer,
    game::Panel,
};

type Display<I> = Ssd1306<I2CInterface<I>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// The game screen. Each [`Panel::show`] replaces the whole picture.
pub struct Oled<I> {
    display: Display<I>,
}

impl<I: I2c> Oled<I> {
    /// Initialise the panel at the default 0x3C address and blank it.
    pub fn new(i2c: I) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init()?;
        display.flush()?;
        debug!("ssd1306 ready");
        Ok(Self { display })
    }

    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.display.set_display_on(on)
    }

    pub fn set_brightness(&mut self, brightness: Brightness) -> Result<(), DisplayError> {
        self.display.set_brightness(brightness)
    }

    pub fn release(self) -> I {
        self.display.release().release()
    }
}

impl<I: I2c> Panel for Oled<I> {
    type Error = DisplayError;

    fn show(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.display.clear_buffer();
        self.display.draw_iter(frame.lit_pixels())?;
        self.display.flush()
    }
}
