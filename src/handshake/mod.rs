//! Request/acknowledge handshake with the FPGA alert controller.
//!
//! ## Protocol (one attempt)
//!
//! | Step | Monitor                         | Controller          |
//! |------|---------------------------------|---------------------|
//! | 1    | drive the four data lines       |                     |
//! | 2    | wait `settle_ms`                |                     |
//! | 3    | raise REQUEST                   | latches data lines  |
//! | 4    | poll ACK until high / timeout   | raises ACK          |
//! | 5    | lower REQUEST                   |                     |
//! | 6    | poll ACK until low / timeout    | lowers ACK          |
//!
//! An ACK timeout at step 4 lowers REQUEST and retries from step 1, up to
//! `max_attempts`. A timeout at step 6 means the controller is wedged and
//! is not retried. Both failures park the lines (all low) and raise one
//! Error notification.
//!
//! Elapsed time is accumulated from the poll intervals handed to the
//! delay provider, so the engine needs no clock. ACK is sampled only
//! while the elapsed time is below the budget: with a 500 ms budget and
//! 10 ms polls the last sample is taken at 490 ms.

pub mod attempt;
pub mod bring_up;
pub mod lines;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, error, warn};

use crate::app::ports::NotificationSink;
use crate::app::sample::AlertVector;
use crate::config::HandshakeConfig;
use crate::error::HandshakeError;
use crate::notifications::Notification;

pub use attempt::{HandshakeAttempt, Phase};
pub use bring_up::bring_up;
pub use lines::{BringUpLines, HandshakeLines};

/// Outcome of a successful delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempts: u8,
    pub retries: u8,
}

/// Running link counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Successful deliveries.
    pub delivered: u32,
    /// Retries across all deliveries.
    pub retried: u32,
    /// Deliveries abandoned after the last attempt timed out.
    pub exhausted: u32,
    /// Deliveries abandoned because ACK never cleared.
    pub wedged: u32,
}

pub struct HandshakeEngine<O, I, D> {
    lines: HandshakeLines<O, I>,
    delay: D,
    config: HandshakeConfig,
    stats: LinkStats,
}

impl<O, I, D> HandshakeEngine<O, I, D>
where
    O: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    /// Take ownership of the lines and drive them all low.
    pub fn new(
        mut lines: HandshakeLines<O, I>,
        delay: D,
        config: HandshakeConfig,
    ) -> Result<Self, HandshakeError> {
        lines.park()?;
        Ok(Self {
            lines,
            delay,
            config,
            stats: LinkStats::default(),
        })
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Run link bring-up using this engine's delay provider.
    pub fn bring_up<RO: OutputPin, RI: InputPin>(
        &mut self,
        lines: &mut BringUpLines<RO, RI>,
        sink: &impl NotificationSink,
    ) -> Result<u32, HandshakeError> {
        bring_up(lines, &mut self.delay, self.config.bringup_poll_ms, sink)
    }

    /// Sleep between deliveries.
    pub fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Deliver one alert vector, retrying on ACK timeout.
    ///
    /// Every failure leaves the lines parked and raises exactly one Error
    /// notification.
    pub fn deliver(
        &mut self,
        vector: AlertVector,
        sink: &impl NotificationSink,
    ) -> Result<DeliveryReport, HandshakeError> {
        match self.run_delivery(vector) {
            Ok(report) => {
                self.stats.delivered += 1;
                self.stats.retried += u32::from(report.retries);
                if report.retries > 0 {
                    sink.notify(Notification::info("HS Success!"));
                } else {
                    debug!("HS delivered {:?} on first attempt", vector);
                }
                Ok(report)
            }
            Err(e) => {
                if let Err(park_err) = self.lines.park() {
                    error!("HS: failed to park lines: {}", park_err);
                }
                match e {
                    HandshakeError::DeliveryExhausted { .. } => {
                        self.stats.exhausted += 1;
                        sink.notify(Notification::error("HS Failed!"));
                    }
                    HandshakeError::LinkWedged => {
                        self.stats.wedged += 1;
                        sink.notify(Notification::error("FPGA Frozen!"));
                    }
                    HandshakeError::Gpio(_) => {
                        sink.notify(Notification::error("HS Line Fault!"));
                    }
                }
                error!("HS delivery failed: {} (stats {:?})", e, self.stats);
                Err(e)
            }
        }
    }

    fn run_delivery(&mut self, vector: AlertVector) -> Result<DeliveryReport, HandshakeError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = HandshakeAttempt::new();

        loop {
            attempt.begin();

            self.lines.drive_data(&vector)?;
            attempt.enter(Phase::LinesSet);
            self.delay.delay_ms(self.config.settle_ms);

            self.lines.set_request(true)?;
            attempt.enter(Phase::RequestSent);

            attempt.enter(Phase::AwaitAck);
            if self.poll_ack(true, self.config.ack_timeout_ms, &mut attempt)? {
                attempt.enter(Phase::AckReceived);
                self.lines.set_request(false)?;

                attempt.enter(Phase::AwaitAckClear);
                if !self.poll_ack(false, self.config.ack_clear_timeout_ms, &mut attempt)? {
                    return Err(HandshakeError::LinkWedged);
                }

                attempt.enter(Phase::Idle);
                return Ok(DeliveryReport {
                    attempts: attempt.attempt_count(),
                    retries: attempt.retries(),
                });
            }

            // Fresh rising edge for the next attempt.
            self.lines.set_request(false)?;
            if attempt.attempt_count() >= max_attempts {
                return Err(HandshakeError::DeliveryExhausted {
                    attempts: attempt.attempt_count(),
                });
            }
            warn!(
                "HS Retry... no ACK after {}ms (attempt {}/{})",
                attempt.elapsed_ms(),
                attempt.attempt_count(),
                max_attempts
            );
        }
    }

    /// Poll ACK until it reads `level`. Samples are taken strictly inside
    /// the budget (0, 10, .., budget - interval ms); once `budget_ms` has
    /// elapsed the poll reports a timeout without sampling again.
    fn poll_ack(
        &mut self,
        level: bool,
        budget_ms: u32,
        attempt: &mut HandshakeAttempt,
    ) -> Result<bool, HandshakeError> {
        let mut waited: u32 = 0;
        while waited < budget_ms {
            if self.lines.acknowledged()? == level {
                return Ok(true);
            }
            self.delay.delay_ms(self.config.poll_interval_ms);
            waited = waited.saturating_add(self.config.poll_interval_ms);
            attempt.wait(self.config.poll_interval_ms);
        }
        Ok(false)
    }
}
