//! NTC thermistor water-temperature probe (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor and read on
//! ADC1. The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature. Open or shorted probes read -40 C, which
//! the analyzer reports as "Temp Low!".

use super::{AdcScale, RawSource};

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const FAULT_C: f32 = -40.0;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    pub celsius: f32,
}

pub struct TemperatureSensor<S> {
    source: S,
    scale: AdcScale,
}

impl<S: RawSource> TemperatureSensor<S> {
    pub fn new(source: S, scale: AdcScale) -> Self {
        Self { source, scale }
    }

    pub fn read(&mut self) -> TemperatureReading {
        let raw = self.source.read_raw();
        TemperatureReading {
            raw,
            celsius: self.raw_to_celsius(raw),
        }
    }

    fn raw_to_celsius(&self, raw: u16) -> f32 {
        let vref = self.scale.vref;
        let voltage = self.scale.volts(raw);
        if voltage <= 0.01 || voltage >= (vref - 0.01) {
            return FAULT_C;
        }
        let r_ntc = R_DIVIDER * voltage / (vref - voltage);
        let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
        if inv_t <= 0.0 {
            return FAULT_C;
        }
        (1.0 / inv_t) - 273.15
    }
}
