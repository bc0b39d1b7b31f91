//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! Each driver reads raw ADC codes through a [`RawSource`], filters a burst
//! of samples, and converts to engineering units. The hub implements
//! [`SensorPort`] so the acquisition loop never sees a raw code.

pub mod ph;
pub mod tds;
pub mod temperature;

use embedded_hal::delay::DelayNs;

use crate::app::ports::SensorPort;
use ph::PhSensor;
use tds::TdsSensor;
use temperature::TemperatureSensor;

/// One raw analog reading per call.
pub trait RawSource {
    fn read_raw(&mut self) -> u16;
}

/// ADC1 oneshot channel (configured by `hw_init`). Host builds read the
/// simulated level set with [`hw_init::sim_set_adc1`](crate::drivers::hw_init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcChannel {
    channel: u32,
}

impl AdcChannel {
    pub const fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl RawSource for AdcChannel {
    fn read_raw(&mut self) -> u16 {
        crate::drivers::hw_init::adc1_read(self.channel)
    }
}

/// Raw code to volts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcScale {
    pub vref: f32,
    pub max_raw: f32,
}

impl AdcScale {
    /// ESP32-S3 ADC1, 12-bit, 12 dB attenuation.
    pub const ESP32_ADC1: Self = Self {
        vref: 3.3,
        max_raw: 4095.0,
    };

    pub fn volts(&self, raw: u16) -> f32 {
        raw as f32 * (self.vref / self.max_raw)
    }
}

// ── Burst filters ─────────────────────────────────────────────

/// Lower median of `samples` (sorts in place).
pub fn median(samples: &mut [u16]) -> u16 {
    if samples.is_empty() {
        return 0;
    }
    samples.sort_unstable();
    samples[(samples.len() - 1) / 2]
}

/// Integer mean after discarding `trim` samples from each end (sorts in place).
pub fn trimmed_mean(samples: &mut [u16], trim: usize) -> u16 {
    samples.sort_unstable();
    let kept = samples.get(trim..samples.len().saturating_sub(trim)).unwrap_or(&[]);
    if kept.is_empty() {
        return 0;
    }
    let sum: u32 = kept.iter().map(|&s| u32::from(s)).sum();
    (sum / kept.len() as u32) as u16
}

/// Collect `buf.len()` raw samples, `spacing_ms` apart.
pub(crate) fn sample_burst<S: RawSource, D: DelayNs>(
    source: &mut S,
    delay: &mut D,
    spacing_ms: u32,
    buf: &mut [u16],
) {
    for slot in buf.iter_mut() {
        *slot = source.read_raw();
        delay.delay_ms(spacing_ms);
    }
}

// ── Hub ───────────────────────────────────────────────────────

/// Aggregates the three water-quality sensors.
pub struct SensorHub<S, D> {
    pub temperature: TemperatureSensor<S>,
    pub ph: PhSensor<S, D>,
    pub tds: TdsSensor<S, D>,
}

impl<S: RawSource, D: DelayNs> SensorHub<S, D> {
    pub fn new(
        temperature: TemperatureSensor<S>,
        ph: PhSensor<S, D>,
        tds: TdsSensor<S, D>,
    ) -> Self {
        Self {
            temperature,
            ph,
            tds,
        }
    }
}

impl<S: RawSource, D: DelayNs> SensorPort for SensorHub<S, D> {
    fn read_temperature(&mut self) -> f32 {
        self.temperature.read().celsius
    }

    fn read_ph(&mut self) -> f32 {
        self.ph.read().ph
    }

    fn read_tds(&mut self, current_temperature: f32) -> f32 {
        self.tds.read(current_temperature).ppm
    }
}
