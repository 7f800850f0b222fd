//! Single WS2812 driven by the RMT peripheral.

use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    Blocking,
    gpio::Level,
    rmt::{
        Channel,
        PulseCode,
        Rmt,
        Tx,
        TxChannelConfig,
        TxChannelCreator as _,
    },
    time::Rate,
};
use palette::Srgb;

use super::IndicatorResources;
use crate::Indicator;

/// 24 data bits and the end marker.
const PULSES: usize = 3 * 8 + 1;

pub struct Neopixel<'a> {
    channel: Option<Channel<'a, Blocking, Tx>>,
}

impl<'a> Neopixel<'a> {
    pub const fn new(channel: Channel<'a, Blocking, Tx>) -> Self {
        Self {
            channel: Some(channel),
        }
    }

    /// WS2812 bit timing at 40 MHz RMT clock.
    const fn bit_to_pulse(bit: bool) -> PulseCode {
        if bit {
            // '1': 0.8 µs high (32 ticks), 0.45 µs low (18 ticks)
            PulseCode::new(Level::High, 32, Level::Low, 18)
        } else {
            // '0': 0.4 µs high (16 ticks), 0.85 µs low (34 ticks)
            PulseCode::new(Level::High, 16, Level::Low, 34)
        }
    }

    /// GRB order, most significant bit first.
    fn encode(color: Srgb<u8>) -> [PulseCode; PULSES] {
        let mut pulses = [PulseCode::end_marker(); PULSES];
        let bytes = [color.green, color.red, color.blue];
        for (i, pulse) in pulses[..PULSES - 1].iter_mut().enumerate() {
            let byte = bytes[i / 8];
            *pulse = Self::bit_to_pulse((byte >> (7 - i % 8)) & 1 != 0);
        }
        pulses
    }
}

impl Indicator for Neopixel<'_> {
    async fn set(&mut self, color: Srgb<u8>) {
        let Some(channel) = self.channel.take() else {
            error!("RMT channel lost during previous transmission");
            return;
        };

        let pulses = Self::encode(color);
        let transaction = match channel.transmit(&pulses) {
            Ok(t) => t,
            Err(e) => {
                error!("RMT transmit failed: {}", e);
                return;
            }
        };

        self.channel = Some(match transaction.wait() {
            Ok(ch) => ch,
            Err((err, ch)) => {
                error!("RMT transaction failed: {}", err);
                ch
            }
        });

        // Latch.
        Timer::after(Duration::from_micros(50)).await;
    }
}

impl<'a> TryFrom<IndicatorResources<'a>> for Neopixel<'a> {
    type Error = esp_hal::rmt::Error;

    fn try_from(res: IndicatorResources<'a>) -> Result<Self, Self::Error> {
        let rmt = Rmt::new(res.rmt, Rate::from_mhz(40))?;
        let tx_config = TxChannelConfig::default().with_clk_divider(1);
        let channel = rmt.channel0.configure_tx(res.io, tx_config)?;
        Ok(Self::new(channel))
    }
}
