//! Board support for a Seeed XIAO ESP32-S3 carrier.
//!
//! Wiring:
//! - **I2C** (D4/D5): SSD1306 OLED at 0x3C and ADXL345 at 0x53 on one bus
//! - **Encoder** (D9/D10) with its push button on D7, active low
//! - **Indicator**: one WS2812 on D0, driven by RMT
//!
//! ```rust,ignore
//! let peripherals = tiltris::hw::init();
//! let resources = tiltris::split_resources!(peripherals);
//!
//! let bus: tiltris::hw::I2cBus = resources.i2c.try_into()?;
//! let pins: tiltris::hw::ControlPins = resources.controls.into();
//! let led: tiltris::hw::Neopixel = resources.indicator.try_into()?;
//! ```

mod controls;
mod neopixel;

pub use controls::ControlPins;
use esp_hal::{
    Blocking,
    assign_resources,
    clock::CpuClock,
    i2c::master::{
        Config as I2cConfig,
        ConfigError,
        I2c,
    },
    time::Rate,
};
pub use neopixel::Neopixel;

/// The shared I2C controller.
pub type I2cBus = I2c<'static, Blocking>;

/// One device's handle on the shared bus.
pub type SharedI2c = embedded_hal_bus::i2c::RefCellDevice<'static, I2cBus>;

const I2C_FREQUENCY: Rate = Rate::from_khz(400);

/// StaticCell helper: allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        i2c: I2cResources<'d> {
            sda: GPIO5,
            scl: GPIO6,
            i2c: I2C0,
        },
        controls: ControlResources<'d> {
            encoder_a: GPIO8,
            encoder_b: GPIO9,
            button: GPIO44,
        },
        indicator: IndicatorResources<'d> {
            io: GPIO1,
            rmt: RMT,
        }
    }
}

/// Bring up the chip at full CPU clock and return the raw peripheral set.
///
/// Split it with [`split_resources!`](crate::split_resources) afterwards.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl TryFrom<I2cResources<'static>> for I2cBus {
    type Error = ConfigError;

    fn try_from(res: I2cResources<'static>) -> Result<Self, Self::Error> {
        let config = I2cConfig::default().with_frequency(I2C_FREQUENCY);
        Ok(I2c::new(res.i2c, config)?
            .with_sda(res.sda)
            .with_scl(res.scl))
    }
}
