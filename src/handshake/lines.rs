//! GPIO line bundles for the FPGA link.
//!
//! Every line is an `embedded-hal` 1.0 pin, so the same code drives
//! `esp-idf-hal` `PinDriver`s on the device and recording mocks on the host.
//! `high` means asserted on every line.

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};

use crate::app::sample::AlertVector;
use crate::error::HandshakeError;

fn gpio<E: embedded_hal::digital::Error>(e: E) -> HandshakeError {
    HandshakeError::Gpio(e.kind())
}

/// Data, REQUEST and ACKNOWLEDGE lines used for every delivery.
pub struct HandshakeLines<O, I> {
    pub temperature: O,
    pub ph: O,
    pub tds: O,
    pub button: O,
    pub request: O,
    pub acknowledge: I,
}

impl<O: OutputPin, I: InputPin> HandshakeLines<O, I> {
    /// Present `vector` on the four data lines.
    pub fn drive_data(&mut self, vector: &AlertVector) -> Result<(), HandshakeError> {
        let [t, ph, tds, button] = vector.line_levels();
        self.temperature.set_state(PinState::from(t)).map_err(gpio)?;
        self.ph.set_state(PinState::from(ph)).map_err(gpio)?;
        self.tds.set_state(PinState::from(tds)).map_err(gpio)?;
        self.button.set_state(PinState::from(button)).map_err(gpio)?;
        Ok(())
    }

    pub fn set_request(&mut self, asserted: bool) -> Result<(), HandshakeError> {
        self.request.set_state(PinState::from(asserted)).map_err(gpio)
    }

    /// Sample ACKNOWLEDGE.
    pub fn acknowledged(&mut self) -> Result<bool, HandshakeError> {
        self.acknowledge.is_high().map_err(gpio)
    }

    /// REQUEST low, then every data line low.
    pub fn park(&mut self) -> Result<(), HandshakeError> {
        self.request.set_low().map_err(gpio)?;
        self.drive_data(&AlertVector::CLEAR)
    }
}

/// RESET output and ALIVE input used once at link bring-up.
pub struct BringUpLines<O, I> {
    pub reset: O,
    pub alive: I,
}

impl<O: OutputPin, I: InputPin> BringUpLines<O, I> {
    pub fn hold_reset(&mut self) -> Result<(), HandshakeError> {
        self.reset.set_low().map_err(gpio)
    }

    pub fn release_reset(&mut self) -> Result<(), HandshakeError> {
        self.reset.set_high().map_err(gpio)
    }

    pub fn alive(&mut self) -> Result<bool, HandshakeError> {
        self.alive.is_high().map_err(gpio)
    }
}
