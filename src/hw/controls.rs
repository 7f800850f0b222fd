//! Encoder and button pins.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use super::ControlResources;

/// The encoder module pulls its phases up itself; the button pin needs the
/// internal pull-up.
pub struct ControlPins {
    pub encoder_a: Input<'static>,
    pub encoder_b: Input<'static>,
    pub button: Input<'static>,
}

impl From<ControlResources<'static>> for ControlPins {
    fn from(res: ControlResources<'static>) -> Self {
        Self {
            encoder_a: Input::new(res.encoder_a, InputConfig::default()),
            encoder_b: Input::new(res.encoder_b, InputConfig::default()),
            button: Input::new(res.button, InputConfig::default().with_pull(Pull::Up)),
        }
    }
}
