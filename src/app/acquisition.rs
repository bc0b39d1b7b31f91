//! Acquisition & distribution loop body.
//!
//! One call to [`AcquisitionLoop::run_cycle`] reads every sensor and
//! button A, runs the analyzer, and publishes the sample and the vector to
//! their mailboxes. Pacing belongs to the task that calls it.

use log::debug;

use crate::app::analyzer::AlertAnalyzer;
use crate::app::ports::{ButtonPort, NotificationSink, SensorPort};
use crate::app::sample::{AlertVector, RawSample};
use crate::mailbox::Mailbox;
use crate::notifications::Notification;

/// What one cycle produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle counter.
    pub cycle: u32,
    pub sample: RawSample,
    pub vector: AlertVector,
}

pub struct AcquisitionLoop {
    analyzer: AlertAnalyzer,
    cycle: u32,
}

impl AcquisitionLoop {
    pub fn new(analyzer: AlertAnalyzer) -> Self {
        Self { analyzer, cycle: 0 }
    }

    /// Gather one sample, analyse it, and publish both results.
    ///
    /// TDS is compensated with the temperature read in the same cycle.
    pub fn run_cycle<H>(
        &mut self,
        hw: &mut H,
        sink: &impl NotificationSink,
        samples: &Mailbox<RawSample>,
        alerts: &Mailbox<AlertVector>,
    ) -> CycleReport
    where
        H: SensorPort + ButtonPort,
    {
        let temperature = hw.read_temperature();
        let ph = hw.read_ph();
        let tds = hw.read_tds(temperature);
        let button = hw.read_button();
        let sample = RawSample {
            temperature,
            ph,
            tds,
            button,
        };

        if sample.button {
            sink.notify(Notification::info("Manual start"));
        }

        let vector = self.analyzer.process(&sample, sink);
        samples.publish(sample);
        alerts.publish(vector);

        self.cycle = self.cycle.wrapping_add(1);
        debug!(
            "ACQ #{} | T={:.2}\u{00b0}C pH={:.2} TDS={:.1}ppm btn={} | alerts={:?}",
            self.cycle,
            sample.temperature,
            sample.ph,
            sample.tds,
            sample.button,
            vector.line_levels(),
        );

        CycleReport {
            cycle: self.cycle,
            sample,
            vector,
        }
    }

    pub fn cycles(&self) -> u32 {
        self.cycle
    }
}
