//! System configuration parameters
//!
//! All tunable parameters for the AquaWatch monitor: alert thresholds,
//! handshake timing, and the task table. Values are compiled-in defaults
//! and must pass [`SystemConfig::validate`] before the tasks start.

use serde::{Deserialize, Serialize};

use crate::drivers::task_pin::Core;
use crate::error::ConfigError;

/// Safe operating envelope for the monitored water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Lower temperature bound (°C), inclusive.
    pub min_temperature_c: f32,
    /// Upper temperature bound (°C), inclusive.
    pub max_temperature_c: f32,
    /// Lower pH bound, inclusive.
    pub min_ph: f32,
    /// Upper pH bound, inclusive.
    pub max_ph: f32,
    /// Width `F` of the pH bands that select the TDS limit curve.
    pub ph_band_width: f32,
    /// TDS limit (ppm) when temperature is outside its bounds.
    pub default_max_tds_ppm: f32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            min_temperature_c: 24.0,
            max_temperature_c: 30.0,
            min_ph: 6.0,
            max_ph: 8.0,
            ph_band_width: 0.5,
            default_max_tds_ppm: 750.0,
        }
    }
}

/// Timing and retry budget for the FPGA request/acknowledge link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeConfig {
    /// Budget for ACK to rise after REQUEST is raised (per attempt).
    pub ack_timeout_ms: u32,
    /// Independent budget for ACK to fall after REQUEST is lowered.
    pub ack_clear_timeout_ms: u32,
    /// ACK polling interval.
    pub poll_interval_ms: u32,
    /// Data-line settle time before REQUEST is raised.
    pub settle_ms: u32,
    /// Attempts per delivery (first try included).
    pub max_attempts: u8,
    /// ALIVE polling interval during bring-up.
    pub bringup_poll_ms: u32,
    /// Minimum gap between consecutive deliveries.
    pub delivery_interval_ms: u32,
    /// Re-run link bring-up after a wedged controller.
    pub reset_on_wedge: bool,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            ack_timeout_ms: 500,
            ack_clear_timeout_ms: 500,
            poll_interval_ms: 10,
            settle_ms: 1,
            max_attempts: 3,
            bringup_poll_ms: 100,
            delivery_interval_ms: 250,
            reset_on_wedge: false,
        }
    }
}

/// Startup descriptor for one spawned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Null-terminated thread name (ESP-IDF pthread requirement).
    pub name: &'static str,
    pub core: Core,
    pub priority: u8,
    pub stack_kb: usize,
    /// Nominal loop period.
    pub period_ms: u32,
}

/// One descriptor per logical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTable {
    pub acquisition: TaskDescriptor,
    pub handshake: TaskDescriptor,
    pub display: TaskDescriptor,
    pub pagination: TaskDescriptor,
}

impl Default for TaskTable {
    fn default() -> Self {
        Self {
            acquisition: TaskDescriptor {
                name: "acquire\0",
                core: Core::Pro,
                priority: 2,
                stack_kb: 8,
                period_ms: 125,
            },
            handshake: TaskDescriptor {
                name: "handshake\0",
                core: Core::App,
                priority: 2,
                stack_kb: 6,
                period_ms: 250,
            },
            display: TaskDescriptor {
                name: "display\0",
                core: Core::App,
                priority: 1,
                stack_kb: 6,
                period_ms: 250,
            },
            pagination: TaskDescriptor {
                name: "paginate\0",
                core: Core::Pro,
                priority: 3,
                stack_kb: 4,
                period_ms: 125,
            },
        }
    }
}

impl TaskTable {
    pub fn iter(&self) -> impl Iterator<Item = &TaskDescriptor> {
        [&self.acquisition, &self.handshake, &self.display, &self.pagination].into_iter()
    }
}

/// Core system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    pub thresholds: AlertThresholds,
    pub handshake: HandshakeConfig,
    /// Task layout is fixed at build time; never serialised.
    #[serde(skip)]
    pub tasks: TaskTable,
}

impl SystemConfig {
    /// Reject configurations that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !(t.min_temperature_c < t.max_temperature_c) {
            return Err(ConfigError::ValidationFailed(
                "min_temperature_c must be below max_temperature_c",
            ));
        }
        if !(t.min_ph < t.max_ph) {
            return Err(ConfigError::ValidationFailed("min_ph must be below max_ph"));
        }
        if !(t.ph_band_width > 0.0) || t.min_ph + 3.0 * t.ph_band_width > t.max_ph {
            return Err(ConfigError::ValidationFailed(
                "ph_band_width must fit three bands inside the pH range",
            ));
        }
        if !(t.default_max_tds_ppm > 0.0) {
            return Err(ConfigError::ValidationFailed("default_max_tds_ppm must be positive"));
        }

        let h = &self.handshake;
        if h.poll_interval_ms == 0 || h.bringup_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll intervals must be non-zero"));
        }
        if h.ack_timeout_ms < h.poll_interval_ms || h.ack_clear_timeout_ms < h.poll_interval_ms {
            return Err(ConfigError::ValidationFailed("ACK timeouts must cover at least one poll"));
        }
        if h.max_attempts == 0 {
            return Err(ConfigError::ValidationFailed("max_attempts must be at least 1"));
        }

        if self.tasks.iter().any(|d| d.period_ms == 0 || d.stack_kb == 0) {
            return Err(ConfigError::ValidationFailed("task period and stack must be non-zero"));
        }
        if self.tasks.iter().any(|d| !d.name.ends_with('\0')) {
            return Err(ConfigError::ValidationFailed("task names must be null-terminated"));
        }
        Ok(())
    }
}
