//! Analog TDS meter with temperature compensation.
//!
//! Thirty samples 10 ms apart, median-filtered. The voltage is compensated
//! at 2 %/°C around 25 °C and converted with the probe's cubic fit.

use embedded_hal::delay::DelayNs;

use super::{AdcScale, RawSource, median, sample_burst};

const NUM_SAMPLES: usize = 30;
const SAMPLE_SPACING_MS: u32 = 10;
const REFERENCE_C: f32 = 25.0;
const COMPENSATION_PER_C: f32 = 0.02;
/// Floor for the compensation coefficient. The linear model reaches zero
/// at -25 °C; a failed temperature read must not blow the voltage up.
const MIN_COEFFICIENT: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct TdsReading {
    /// Median raw code.
    pub raw: u16,
    /// Temperature-compensated voltage.
    pub compensated_volts: f32,
    pub ppm: f32,
}

pub struct TdsSensor<S, D> {
    source: S,
    delay: D,
    scale: AdcScale,
}

impl<S: RawSource, D: DelayNs> TdsSensor<S, D> {
    pub fn new(source: S, delay: D, scale: AdcScale) -> Self {
        Self {
            source,
            delay,
            scale,
        }
    }

    pub fn read(&mut self, current_temperature: f32) -> TdsReading {
        let mut samples = [0u16; NUM_SAMPLES];
        sample_burst(&mut self.source, &mut self.delay, SAMPLE_SPACING_MS, &mut samples);
        let raw = median(&mut samples);
        let compensated_volts = compensate(self.scale.volts(raw), current_temperature);
        TdsReading {
            raw,
            compensated_volts,
            ppm: volts_to_ppm(compensated_volts),
        }
    }
}

/// Normalise a probe voltage to its 25 °C equivalent.
pub fn compensate(volts: f32, celsius: f32) -> f32 {
    let coefficient = 1.0 + COMPENSATION_PER_C * (celsius - REFERENCE_C);
    volts / coefficient.max(MIN_COEFFICIENT)
}

pub fn volts_to_ppm(v: f32) -> f32 {
    (133.42 * v * v * v - 255.86 * v * v + 857.39 * v) * 0.5
}
