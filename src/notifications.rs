//! Operator-facing notifications.
//!
//! Producers (analyzer, acquisition loop, handshake engine) push into a
//! bounded [`NotificationQueue`]; the display task drains it into a
//! [`NotificationHistory`] that backs the notifications page.
//!
//! ```text
//! ┌────────────┐
//! │ Analyzer   │──▶┐
//! │ Acquisition│──▶│  NotificationQueue   ──drain──▶  NotificationHistory
//! │ Handshake  │──▶┘  (5 slots, drop-oldest)          (last 5, display)
//! └────────────┘
//! ```
//!
//! ## Overflow policy
//!
//! A full queue drops its **oldest** entry to make room. Producers never
//! wait. Every drop is counted ([`NotificationQueue::dropped`]) and logged,
//! but never turned into another notification.

use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::{Deque, String, Vec};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::NotificationSink;

/// Queue and history depth (five lines on the notifications page).
pub const MAX_NOTIFICATIONS: usize = 5;

/// Maximum message length in bytes (one display line).
pub const MESSAGE_CAP: usize = 22;

/// Bounded notification text.
pub type Message = String<MESSAGE_CAP>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Alert,
    Error,
}

impl Severity {
    /// Two-letter prefix used on the notifications page.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Info => "IN",
            Self::Alert => "AL",
            Self::Error => "ER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: Message,
}

impl Notification {
    /// Build a notification, truncating `text` to [`MESSAGE_CAP`] bytes on
    /// a character boundary.
    pub fn new(severity: Severity, text: &str) -> Self {
        let mut message = Message::new();
        for ch in text.chars() {
            if message.push(ch).is_err() {
                break;
            }
        }
        Self { severity, message }
    }

    pub fn info(text: &str) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn alert(text: &str) -> Self {
        Self::new(Severity::Alert, text)
    }

    pub fn error(text: &str) -> Self {
        Self::new(Severity::Error, text)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.tag(), self.message)
    }
}

// ───────────────────────────────────────────────────────────────
// Queue
// ───────────────────────────────────────────────────────────────

/// Bounded multi-producer notification queue with drop-oldest overflow.
///
/// The deque lives behind a critical-section mutex held only for the
/// push/pop itself, so it can sit in a `static` shared by every task.
pub struct NotificationQueue<const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Deque<Notification, N>>>,
    dropped: AtomicU32,
}

impl<const N: usize> NotificationQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue without waiting. Returns `false` if the oldest entry had to
    /// be evicted to make room.
    pub fn push(&self, notification: Notification) -> bool {
        match notification.severity {
            Severity::Info => info!("NOTIFY | {}", notification),
            Severity::Alert => warn!("NOTIFY | {}", notification),
            Severity::Error => error!("NOTIFY | {}", notification),
        }

        let evicted = self.inner.lock(|q| {
            let mut q = q.borrow_mut();
            let evicted = if q.is_full() { q.pop_front() } else { None };
            // Cannot fail: a slot was freed above if the deque was full.
            let _ = q.push_back(notification);
            evicted
        });

        match evicted {
            Some(old) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!("Notification queue full, dropped oldest '{}' ({} total)", old, total);
                false
            }
            None => true,
        }
    }

    /// Dequeue the oldest pending notification.
    pub fn pop(&self) -> Option<Notification> {
        self.inner.lock(|q| q.borrow_mut().pop_front())
    }

    /// Hand every pending notification to `consumer`, oldest first.
    /// The lock is released between entries.
    pub fn drain(&self, mut consumer: impl FnMut(Notification)) {
        while let Some(n) = self.pop() {
            consumer(n);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock(|q| q.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total notifications evicted by overflow since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for NotificationQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NotificationSink for NotificationQueue<N> {
    fn notify(&self, notification: Notification) {
        self.push(notification);
    }
}

// ───────────────────────────────────────────────────────────────
// History
// ───────────────────────────────────────────────────────────────

/// The most recent `N` notifications, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationHistory<const N: usize> {
    entries: Vec<Notification, N>,
}

impl<const N: usize> NotificationHistory<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, notification: Notification) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        // Cannot fail: a slot was freed above.
        let _ = self.entries.push(notification);
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
