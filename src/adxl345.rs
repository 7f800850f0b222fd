//! ADXL345 three-axis accelerometer on I2C.
//!
//! The part runs in full-resolution mode, so one LSB is 4 mg whatever the
//! range.

use embedded_hal::i2c::I2c;

use crate::TiltSensor;

/// Address with SDO/ALT pulled low.
pub const ADDRESS: u8 = 0x53;

const REG_DEVID: u8 = 0x00;
const REG_POWER_CTL: u8 = 0x2D;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32;

const DEVICE_ID: u8 = 0xE5;
const MEASURE: u8 = 0x08;
const FULL_RES: u8 = 0x08;

/// g per LSB in full-resolution mode.
const G_PER_LSB: f32 = 0.004;
const STANDARD_GRAVITY: f32 = 9.806_65;

/// Measurement range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    #[default]
    G2 = 0b00,
    G4 = 0b01,
    G8 = 0b10,
    G16 = 0b11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    I2c(E),
    /// DEVID did not read back as 0xE5.
    UnknownDevice(u8),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "i2c error: {e:?}"),
            Self::UnknownDevice(id) => write!(f, "unexpected device id {id:#04x}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

pub struct Adxl345<I> {
    i2c: I,
}

impl<I: I2c> Adxl345<I> {
    /// Probe the part and start measuring at ±2 g.
    pub fn new(i2c: I) -> Result<Self, Error<I::Error>> {
        Self::with_range(i2c, Range::G2)
    }

    pub fn with_range(i2c: I, range: Range) -> Result<Self, Error<I::Error>> {
        let mut sensor = Self { i2c };
        let id = sensor.read_register(REG_DEVID)?;
        if id != DEVICE_ID {
            return Err(Error::UnknownDevice(id));
        }
        sensor.write_register(REG_DATA_FORMAT, FULL_RES | range as u8)?;
        sensor.write_register(REG_POWER_CTL, MEASURE)?;
        debug!("adxl345 ready, range {}", range);
        Ok(sensor)
    }

    /// Raw x, y, z counts.
    pub fn raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(ADDRESS, &[REG_DATAX0], &mut buf)
            .map_err(Error::I2c)?;
        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    pub fn release(self) -> I {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Error<I::Error>> {
        let mut value = [0u8];
        self.i2c
            .write_read(ADDRESS, &[reg], &mut value)
            .map_err(Error::I2c)?;
        Ok(value[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.i2c.write(ADDRESS, &[reg, value]).map_err(Error::I2c)
    }
}

impl<I: I2c> TiltSensor for Adxl345<I> {
    type Error = Error<I::Error>;

    /// Acceleration in m/s².
    fn acceleration(&mut self) -> Result<[f32; 3], Self::Error> {
        let counts = self.raw()?;
        Ok(counts.map(|c| f32::from(c) * G_PER_LSB * STANDARD_GRAVITY))
    }
}
