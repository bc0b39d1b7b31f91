//! PH-4502C analog pH probe.
//!
//! Ten samples 10 ms apart; the two lowest and two highest are dropped and
//! the rest averaged. Linear conversion: `pH = -5.70 · V + 20.5`.

use embedded_hal::delay::DelayNs;

use super::{AdcScale, RawSource, sample_burst, trimmed_mean};

const NUM_SAMPLES: usize = 10;
const TRIM: usize = 2;
const SAMPLE_SPACING_MS: u32 = 10;
const VOLTS_TO_PH_SLOPE: f32 = -5.70;
const CALIBRATION_OFFSET: f32 = 20.5;

#[derive(Debug, Clone, Copy)]
pub struct PhReading {
    /// Filtered raw code.
    pub raw: u16,
    pub volts: f32,
    pub ph: f32,
}

pub struct PhSensor<S, D> {
    source: S,
    delay: D,
    scale: AdcScale,
}

impl<S: RawSource, D: DelayNs> PhSensor<S, D> {
    pub fn new(source: S, delay: D, scale: AdcScale) -> Self {
        Self {
            source,
            delay,
            scale,
        }
    }

    pub fn read(&mut self) -> PhReading {
        let mut samples = [0u16; NUM_SAMPLES];
        sample_burst(&mut self.source, &mut self.delay, SAMPLE_SPACING_MS, &mut samples);
        let raw = trimmed_mean(&mut samples, TRIM);
        let volts = self.scale.volts(raw);
        PhReading {
            raw,
            volts,
            ph: volts_to_ph(volts),
        }
    }
}

pub fn volts_to_ph(volts: f32) -> f32 {
    VOLTS_TO_PH_SLOPE * volts + CALIBRATION_OFFSET
}
