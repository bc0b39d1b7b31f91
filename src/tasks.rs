//! Task bodies for the four scheduled units.
//!
//! | Task        | Waits on                 | Produces                   |
//! |-------------|--------------------------|----------------------------|
//! | acquisition | its period               | sample + vector mailboxes  |
//! | handshake   | `ALERT_MAILBOX`          | FPGA line traffic          |
//! | display     | its period               | one page per refresh       |
//! | pagination  | its period + button B    | page changes               |
//!
//! Each `run_*` function loops forever and is meant to be handed to
//! [`spawn_task`](crate::drivers::task_pin::spawn_task). The per-iteration
//! work lives in plain methods so tests can drive it step by step.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{error, info, warn};

use crate::app::acquisition::AcquisitionLoop;
use crate::app::analyzer::AlertAnalyzer;
use crate::app::ports::{ButtonPort, DisplayPort, NotificationSink, SensorPort};
use crate::app::sample::AlertVector;
use crate::channels::{ALERT_MAILBOX, NOTIFICATIONS, SAMPLE_MAILBOX};
use crate::config::{AlertThresholds, TaskDescriptor};
use crate::display::DisplayContext;
use crate::drivers::watchdog::TaskWatchdog;
use crate::error::HandshakeError;
use crate::handshake::{BringUpLines, DeliveryReport, HandshakeEngine};
use crate::mailbox::Mailbox;

/// Display context shared by the display and pagination tasks.
pub type SharedDisplay<D> = Arc<Mutex<DisplayContext<D>>>;

/// Lock the display, recovering it if a previous holder panicked.
pub fn lock_display<D>(display: &Mutex<DisplayContext<D>>) -> MutexGuard<'_, DisplayContext<D>> {
    display.lock().unwrap_or_else(|poisoned| {
        warn!("Display mutex poisoned, recovering");
        poisoned.into_inner()
    })
}

// ── Pacing ────────────────────────────────────────────────────

/// Fixed-period pacing: sleep the remainder of the period after the work.
/// An overrun is logged and the next cycle starts immediately.
pub struct Pacer {
    name: &'static str,
    period: Duration,
    started: Instant,
    overruns: u32,
}

impl Pacer {
    pub fn new(task: &TaskDescriptor) -> Self {
        Self {
            name: task.name.trim_end_matches('\0'),
            period: Duration::from_millis(u64::from(task.period_ms)),
            started: Instant::now(),
            overruns: 0,
        }
    }

    pub fn begin(&mut self) {
        self.started = Instant::now();
    }

    /// Sleep out the rest of the period. Returns the time slept.
    pub fn finish(&mut self) -> Duration {
        let busy = self.started.elapsed();
        match self.period.checked_sub(busy) {
            Some(rest) if !rest.is_zero() => {
                std::thread::sleep(rest);
                rest
            }
            _ => {
                self.overruns = self.overruns.saturating_add(1);
                warn!(
                    "{}: cycle took {}ms, period {}ms (overrun #{})",
                    self.name,
                    busy.as_millis(),
                    self.period.as_millis(),
                    self.overruns
                );
                Duration::ZERO
            }
        }
    }

    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}

// ── Acquisition ───────────────────────────────────────────────

pub fn run_acquisition<H>(task: TaskDescriptor, mut hw: H, thresholds: AlertThresholds) -> !
where
    H: SensorPort + ButtonPort,
{
    info!("[Started] acquisition");
    let watchdog = TaskWatchdog::subscribe(&task);
    let mut acquisition = AcquisitionLoop::new(AlertAnalyzer::new(thresholds));
    let mut pacer = Pacer::new(&task);

    loop {
        pacer.begin();
        acquisition.run_cycle(&mut hw, &NOTIFICATIONS, &SAMPLE_MAILBOX, &ALERT_MAILBOX);
        watchdog.feed();
        pacer.finish();
    }
}

// ── Handshake ─────────────────────────────────────────────────

/// Handshake engine plus the bring-up lines it may need again after a
/// wedged controller.
pub struct HandshakeTask<O, I, D, RO, RI> {
    engine: HandshakeEngine<O, I, D>,
    bring_up: BringUpLines<RO, RI>,
}

impl<O, I, D, RO, RI> HandshakeTask<O, I, D, RO, RI>
where
    O: OutputPin,
    I: InputPin,
    D: DelayNs,
    RO: OutputPin,
    RI: InputPin,
{
    pub fn new(engine: HandshakeEngine<O, I, D>, bring_up: BringUpLines<RO, RI>) -> Self {
        Self { engine, bring_up }
    }

    /// Bring the controller up, retrying after GPIO faults.
    pub fn connect(&mut self, sink: &impl NotificationSink) {
        loop {
            match self.engine.bring_up(&mut self.bring_up, sink) {
                Ok(_) => return,
                Err(e) => {
                    error!("FPGA bring-up failed: {}, retrying", e);
                    let backoff = self.engine.config().bringup_poll_ms;
                    self.engine.pause(backoff);
                }
            }
        }
    }

    /// Deliver one vector. A wedged controller is re-initialised when
    /// `reset_on_wedge` is set.
    pub fn serve(
        &mut self,
        vector: AlertVector,
        sink: &impl NotificationSink,
    ) -> Result<DeliveryReport, HandshakeError> {
        let result = self.engine.deliver(vector, sink);
        let wedged = matches!(result, Err(HandshakeError::LinkWedged));
        if wedged && self.engine.config().reset_on_wedge {
            warn!("FPGA wedged, re-running bring-up");
            self.connect(sink);
        }
        result
    }

    /// Wait for the next vector, deliver it, then observe the delivery gap.
    pub fn serve_next(
        &mut self,
        alerts: &Mailbox<AlertVector>,
        sink: &impl NotificationSink,
    ) -> Result<DeliveryReport, HandshakeError> {
        let vector = alerts.wait_blocking();
        let result = self.serve(vector, sink);
        let gap = self.engine.config().delivery_interval_ms;
        self.engine.pause(gap);
        result
    }

    pub fn engine(&self) -> &HandshakeEngine<O, I, D> {
        &self.engine
    }

    pub fn run(mut self) -> ! {
        info!("[Started] handshake");
        self.connect(&NOTIFICATIONS);
        loop {
            // Failures are already reported by the engine.
            let _ = self.serve_next(&ALERT_MAILBOX, &NOTIFICATIONS);
        }
    }
}

// ── Display ───────────────────────────────────────────────────

pub fn run_display<D: DisplayPort>(task: TaskDescriptor, display: SharedDisplay<D>) -> ! {
    info!("[Started] display");
    let watchdog = TaskWatchdog::subscribe(&task);
    let mut pacer = Pacer::new(&task);
    loop {
        pacer.begin();
        lock_display(&display).refresh(&SAMPLE_MAILBOX, &NOTIFICATIONS);
        watchdog.feed();
        pacer.finish();
    }
}

// ── Pagination ────────────────────────────────────────────────

/// Read button B once and advance the page if it was pressed.
///
/// `read_button` already reports each press exactly once, so every `true`
/// is a page turn.
pub fn paginate_once<D: DisplayPort>(
    button: &mut impl ButtonPort,
    display: &Mutex<DisplayContext<D>>,
) -> bool {
    if button.read_button() {
        lock_display(display).advance_page();
        true
    } else {
        false
    }
}

pub fn run_pagination<D: DisplayPort>(
    task: TaskDescriptor,
    mut button: impl ButtonPort,
    display: SharedDisplay<D>,
) -> ! {
    info!("[Started] pagination");
    let watchdog = TaskWatchdog::subscribe(&task);
    let mut pacer = Pacer::new(&task);
    loop {
        pacer.begin();
        paginate_once(&mut button, &display);
        watchdog.feed();
        pacer.finish();
    }
}
