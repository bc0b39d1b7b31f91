//! Alert analyzer.
//!
//! Maps each [`RawSample`] to an [`AlertVector`] against the configured
//! [`AlertThresholds`], and raises one Alert notification per quantity on
//! the transition from normal to alert.
//!
//! ## Edge lifecycle
//!
//! 1. The new vector is computed purely from the sample and thresholds.
//! 2. Each field is compared with the retained previous vector in fixed
//!    order (temperature, pH, TDS). A rising edge emits one notification.
//! 3. The previous vector is replaced, once, after all three checks.
//!
//! Falling edges and steady states are silent, so a persistent fault is
//! announced exactly once until it clears.

use log::debug;

use crate::app::ports::NotificationSink;
use crate::app::sample::{AlertVector, RawSample};
use crate::config::AlertThresholds;
use crate::notifications::Notification;

// ── TDS limit curves (ppm as a linear function of °C) ─────────

const ACIDIC_BAND: (f32, f32) = (-16.67, 1300.0);
const NEUTRAL_BAND: (f32, f32) = (-33.33, 1575.0);
const ALKALINE_BAND: (f32, f32) = (-16.67, 950.0);

impl AlertThresholds {
    pub fn temperature_alert(&self, celsius: f32) -> bool {
        celsius < self.min_temperature_c || celsius > self.max_temperature_c
    }

    pub fn ph_alert(&self, ph: f32) -> bool {
        ph < self.min_ph || ph > self.max_ph
    }

    /// TDS limit for the given temperature and pH.
    ///
    /// Within the temperature bounds the limit follows one of three curves
    /// chosen by pH band: `[min, min+F)`, `[min+F, min+3F)`, `[min+3F, max]`.
    /// Outside them, or for a pH outside every band, it is the default.
    pub fn max_tds_ppm(&self, celsius: f32, ph: f32) -> f32 {
        if celsius < self.min_temperature_c || celsius > self.max_temperature_c {
            return self.default_max_tds_ppm;
        }

        let f = self.ph_band_width;
        let curve = if ph >= self.min_ph && ph < self.min_ph + f {
            ACIDIC_BAND
        } else if ph >= self.min_ph + f && ph < self.min_ph + 3.0 * f {
            NEUTRAL_BAND
        } else if ph >= self.min_ph + 3.0 * f && ph <= self.max_ph {
            ALKALINE_BAND
        } else {
            return self.default_max_tds_ppm;
        };

        curve.0 * celsius + curve.1
    }

    pub fn tds_alert(&self, sample: &RawSample) -> bool {
        sample.tds > self.max_tds_ppm(sample.temperature, sample.ph)
    }

    /// Stateless classification of one sample.
    pub fn evaluate(&self, sample: &RawSample) -> AlertVector {
        AlertVector {
            temperature_alert: self.temperature_alert(sample.temperature),
            ph_alert: self.ph_alert(sample.ph),
            tds_alert: self.tds_alert(sample),
            button: sample.button,
        }
    }
}

/// Stateful analyzer holding the previous cycle's vector.
pub struct AlertAnalyzer {
    thresholds: AlertThresholds,
    previous: AlertVector,
}

impl AlertAnalyzer {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self {
            thresholds,
            previous: AlertVector::CLEAR,
        }
    }

    /// Classify `raw`, announce rising edges, and remember the result.
    pub fn process(&mut self, raw: &RawSample, sink: &impl NotificationSink) -> AlertVector {
        let next = self.thresholds.evaluate(raw);
        let prev = self.previous;

        if next.temperature_alert && !prev.temperature_alert {
            if raw.temperature < self.thresholds.min_temperature_c {
                sink.notify(Notification::alert("Temp Low!"));
            } else {
                sink.notify(Notification::alert("Temp High!"));
            }
        }

        if next.ph_alert && !prev.ph_alert {
            if raw.ph < self.thresholds.min_ph {
                sink.notify(Notification::alert("PH Acidic!"));
            } else {
                sink.notify(Notification::alert("PH Alkaline!"));
            }
        }

        if next.tds_alert && !prev.tds_alert {
            sink.notify(Notification::alert("TDS High!"));
        }

        if next != prev {
            debug!("Alert vector changed: {:?} -> {:?}", prev, next);
        }
        self.previous = next;
        next
    }
}
