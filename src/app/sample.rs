//! Per-cycle data records: the raw sensor sample and the alert vector
//! derived from it.
//!
//! Both are `Copy` so they can be published through the single-slot
//! mailboxes by value, with no sharing between producer and consumer.

use serde::{Deserialize, Serialize};

/// One acquisition cycle's worth of sensor readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// Water temperature (°C).
    pub temperature: f32,
    /// pH (dimensionless, 0–14).
    pub ph: f32,
    /// Total dissolved solids (ppm), temperature-compensated.
    pub tds: f32,
    /// Manual button A was pressed during this cycle.
    pub button: bool,
}

/// Boolean summary of which quantities are outside their safe bounds.
///
/// This is exactly the payload driven onto the four handshake data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertVector {
    pub temperature_alert: bool,
    pub ph_alert: bool,
    pub tds_alert: bool,
    /// Raw button state, carried through unmodified.
    pub button: bool,
}

impl AlertVector {
    /// All-false vector; the analyzer's initial memory.
    pub const CLEAR: Self = Self {
        temperature_alert: false,
        ph_alert: false,
        tds_alert: false,
        button: false,
    };

    /// True if any of the three monitored quantities is in alert.
    pub fn any_alert(&self) -> bool {
        self.temperature_alert || self.ph_alert || self.tds_alert
    }

    /// Line levels in wire order: temperature, pH, TDS, button.
    pub fn line_levels(&self) -> [bool; 4] {
        [self.temperature_alert, self.ph_alert, self.tds_alert, self.button]
    }
}
