//! Log-based display adapter.
//!
//! Implements [`DisplayPort`] by writing each page to the ESP-IDF logger
//! (UART / USB-CDC in production). An OLED driver would implement the
//! same trait; layout and fonts are its concern, not the pipeline's.

use log::info;

use crate::app::ports::DisplayPort;
use crate::app::sample::RawSample;
use crate::notifications::Notification;

/// Adapter that logs every rendered page to the serial console.
#[derive(Debug, Default)]
pub struct LogDisplay;

impl LogDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayPort for LogDisplay {
    fn render_summary(&mut self, s: &RawSample) {
        info!(
            "DISPLAY | T={:.1}\u{00b0}C | pH={:.2} | TDS={:.0}ppm",
            s.temperature, s.ph, s.tds
        );
    }

    fn render_metric(&mut self, label: &str, unit: &str, value: f32, alert: bool) {
        info!(
            "DISPLAY | {}: {:.2}{} [{}]",
            label,
            value,
            unit,
            if alert { "ALERT" } else { "OK" }
        );
    }

    fn render_notifications(&mut self, list: &[Notification]) {
        if list.is_empty() {
            info!("DISPLAY | notifications: none");
            return;
        }
        for (i, n) in list.iter().enumerate() {
            info!("DISPLAY | notification {}/{} | {}", i + 1, list.len(), n);
        }
    }
}
