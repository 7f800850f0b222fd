//! Tiltris firmware for a XIAO ESP32-S3 with an SSD1306 OLED, an ADXL345
//! and a rotary encoder.
//!
//! Controls:
//! - Tilt left/right: move the piece
//! - Tilt towards you: drop faster
//! - Encoder: pick the difficulty
//! - Encoder button: start, rotate, restart

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{
    Delay,
    Duration,
    Instant,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use rand::{
    SeedableRng,
    rngs::SmallRng,
};
use tiltris::{
    Config,
    Console,
    Controls,
    SystemClock,
    adxl345::Adxl345,
    hw::{
        ControlPins,
        I2cBus,
        Neopixel,
        SharedI2c,
    },
    mk_static,
    oled::Oled,
    screens,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = tiltris::hw::init();
    let resources = tiltris::split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let config = Config::default();

    let bus: I2cBus = match resources.i2c.try_into() {
        Ok(bus) => bus,
        Err(e) => halt("I2C config rejected", e),
    };
    let bus: &'static RefCell<I2cBus> = mk_static!(RefCell<I2cBus>, RefCell::new(bus));

    let panel = match Oled::new(SharedI2c::new(bus)) {
        Ok(panel) => panel,
        Err(e) => halt("SSD1306 not responding", e),
    };
    let mut sensor = match Adxl345::new(SharedI2c::new(bus)) {
        Ok(sensor) => sensor,
        Err(e) => halt("ADXL345 not found", e),
    };
    let led: Neopixel<'static> = match resources.indicator.try_into() {
        Ok(led) => led,
        Err(e) => halt("RMT setup failed", e),
    };

    // Accelerometer noise and boot time are the only entropy around.
    let noise = sensor.raw().map_or(0, |[x, y, z]| {
        (u64::from(x as u16) << 32) | (u64::from(y as u16) << 16) | u64::from(z as u16)
    });
    let mut rng = SmallRng::seed_from_u64(noise ^ Instant::now().as_ticks() ^ 0xCAFE_BABE);

    let pins: ControlPins = resources.controls.into();
    let controls = Controls::new(sensor, pins.encoder_a, pins.encoder_b, pins.button, &config);

    let mut console = Console::new(controls, panel, led, SystemClock, Delay, config);
    info!("tiltris ready");

    screens::run_forever(&mut console, &mut rng).await;

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}

/// Setup errors are not recoverable; the panic handler prints and resets.
fn halt<E: core::fmt::Debug>(what: &str, err: E) -> ! {
    panic!("{}: {:?}", what, err)
}
