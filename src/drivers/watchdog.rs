//! Per-task watchdog subscription.
//!
//! A [`TaskWatchdog`] subscribes the thread that creates it to the ESP-IDF
//! task watchdog (TWDT) and unsubscribes it on drop. The owner calls
//! [`feed`](TaskWatchdog::feed) once per cycle; a task that stalls past
//! the timeout panics the device.
//!
//! Only periodic tasks subscribe. The handshake task blocks on the alert
//! mailbox and on ALIVE during bring-up, neither of which is bounded.

use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

use crate::config::TaskDescriptor;

/// Stall budget when a task does not ask for a longer one. Above the
/// slowest acquisition cycle (three sensor bursts, about 1.2 s).
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Timeout for `task`: eight periods, but never below the default.
pub fn timeout_for(task: &TaskDescriptor) -> u32 {
    task.period_ms.saturating_mul(8).max(DEFAULT_TIMEOUT_MS)
}

pub struct TaskWatchdog {
    name: &'static str,
    subscribed: bool,
    feeds: AtomicU32,
}

impl TaskWatchdog {
    /// Subscribe the calling thread on behalf of `task`.
    pub fn subscribe(task: &TaskDescriptor) -> Self {
        let name = task.name.trim_end_matches('\0');
        let timeout_ms = timeout_for(task);
        let subscribed = register(timeout_ms);
        if subscribed {
            info!("{}: watchdog armed ({}ms)", name, timeout_ms);
        } else {
            warn!("{}: running without watchdog", name);
        }
        Self {
            name,
            subscribed,
            feeds: AtomicU32::new(0),
        }
    }

    /// Reset this task's countdown.
    pub fn feed(&self) {
        if self.subscribed {
            reset();
        }
        self.feeds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Feeds since subscription.
    pub fn feeds(&self) -> u32 {
        self.feeds.load(Ordering::Relaxed)
    }
}

impl Drop for TaskWatchdog {
    fn drop(&mut self) {
        if self.subscribed {
            unregister();
            info!("{}: watchdog released", self.name);
        }
    }
}

// ── TWDT calls ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn register(timeout_ms: u32) -> bool {
    // SAFETY: plain FFI calls; a null handle means the calling task.
    unsafe {
        let cfg = esp_task_wdt_config_t {
            timeout_ms,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        let ret = esp_task_wdt_reconfigure(&cfg);
        if ret != ESP_OK {
            warn!("TWDT reconfigure returned {}", ret);
        }
        let ret = esp_task_wdt_add(core::ptr::null_mut());
        if ret != ESP_OK {
            warn!("TWDT subscribe failed ({})", ret);
        }
        ret == ESP_OK
    }
}

#[cfg(target_os = "espidf")]
fn reset() {
    // SAFETY: only called for a subscribed task.
    unsafe {
        esp_task_wdt_reset();
    }
}

#[cfg(target_os = "espidf")]
fn unregister() {
    // SAFETY: only called for a subscribed task, from that task.
    unsafe {
        esp_task_wdt_delete(core::ptr::null_mut());
    }
}

// Host: always "subscribed" so feeding is observable in tests.
#[cfg(not(target_os = "espidf"))]
fn register(timeout_ms: u32) -> bool {
    log::debug!("TWDT(sim): {}ms", timeout_ms);
    true
}

#[cfg(not(target_os = "espidf"))]
fn reset() {}

#[cfg(not(target_os = "espidf"))]
fn unregister() {}
