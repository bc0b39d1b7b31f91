//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ domain (analyzer, acquisition, display)
//! ```
//!
//! Driver collaborators (sensor transports, buttons, the display surface)
//! implement these traits. The domain consumes them via generics, so the
//! pipeline never touches hardware directly and every piece runs on the
//! host against mocks.
//!
//! Reads are infallible by contract: a driver always returns *some*
//! value, possibly with degraded accuracy.

use crate::app::sample::RawSample;
use crate::notifications::Notification;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Blocking sensor reads. Each call may suspend the calling task for the
/// sensor's conversion time (hundreds of milliseconds for temperature).
pub trait SensorPort {
    /// Water temperature in °C.
    fn read_temperature(&mut self) -> f32;

    /// pH, filtered over several raw samples.
    fn read_ph(&mut self) -> f32;

    /// TDS in ppm, compensated for `current_temperature` (°C).
    fn read_tds(&mut self, current_temperature: f32) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Button port
// ───────────────────────────────────────────────────────────────

/// Which physical button a [`ButtonPort`] is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    /// Button A: manual start, carried in the alert vector.
    Manual,
    /// Button B: display pagination.
    Page,
}

/// A debounced push-button.
///
/// `read_button` returns `true` once per physical press: implementations
/// block while the button is held and return only after release.
pub trait ButtonPort {
    fn id(&self) -> ButtonId;

    fn read_button(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → display surface)
// ───────────────────────────────────────────────────────────────

/// Page-level drawing primitives. Layout and fonts belong to the adapter.
pub trait DisplayPort {
    /// Overview page with every reading.
    fn render_summary(&mut self, sample: &RawSample);

    /// Single large metric with its unit and alert state.
    fn render_metric(&mut self, label: &str, unit: &str, value: f32, alert: bool);

    /// Recent notifications, oldest first.
    fn render_notifications(&mut self, list: &[Notification]);
}

// ───────────────────────────────────────────────────────────────
// Notification sink (domain → operator)
// ───────────────────────────────────────────────────────────────

/// Where the domain sends operator-facing messages.
///
/// Takes `&self`: the production sink is a queue shared by several tasks.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}
