//! Blocking, release-debounced push-button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. A read that finds the button
//! pressed waits in 10 ms steps until it is released, so one physical
//! press yields exactly one `true` no matter how long it is held.
//!
//! The calling task is blocked for the whole hold; acquisition and
//! pagination both tolerate that.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::{debug, warn};

use crate::app::ports::{ButtonId, ButtonPort};

const RELEASE_POLL_MS: u32 = 10;

pub struct DebouncedButton<P, D> {
    id: ButtonId,
    pin: P,
    delay: D,
}

impl<P: InputPin, D: DelayNs> DebouncedButton<P, D> {
    pub fn new(id: ButtonId, pin: P, delay: D) -> Self {
        Self { id, pin, delay }
    }

    /// Pin level check. A failed read counts as released.
    fn pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("Button {:?}: read failed ({:?}), treating as released", self.id, e);
                false
            }
        }
    }
}

impl<P: InputPin, D: DelayNs> ButtonPort for DebouncedButton<P, D> {
    fn id(&self) -> ButtonId {
        self.id
    }

    fn read_button(&mut self) -> bool {
        if !self.pressed() {
            return false;
        }
        let mut held_ms: u32 = 0;
        while self.pressed() {
            self.delay.delay_ms(RELEASE_POLL_MS);
            held_ms = held_ms.saturating_add(RELEASE_POLL_MS);
        }
        debug!("Button {:?}: pressed (held {}ms)", self.id, held_ms);
        true
    }
}
