//! Single-slot overwrite mailboxes.
//!
//! A thin wrapper over `embassy-sync`'s [`Signal`]: publishing replaces
//! whatever is in the slot, taking empties it. Writers never wait on
//! readers, and a reader always observes one complete value.
//!
//! ```text
//! acquisition ──publish──▶ [ slot ] ──take/wait──▶ display / handshake
//!                  (overwrite)        (latest only)
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Latest-value cell shared between one producer task and one consumer task.
pub struct Mailbox<T: Send> {
    slot: Signal<CriticalSectionRawMutex, T>,
}

impl<T: Send> Mailbox<T> {
    pub const fn new() -> Self {
        Self {
            slot: Signal::new(),
        }
    }

    /// Store `value`, discarding any unread predecessor.
    pub fn publish(&self, value: T) {
        self.slot.signal(value);
    }

    /// Take the pending value, if any, leaving the slot empty.
    pub fn try_take(&self) -> Option<T> {
        self.slot.try_take()
    }

    /// Whether a value is waiting.
    pub fn has_value(&self) -> bool {
        self.slot.signaled()
    }

    /// Wait for the next value.
    pub async fn wait(&self) -> T {
        self.slot.wait().await
    }

    /// Block the calling thread until a value is available.
    pub fn wait_blocking(&self) -> T {
        futures_lite::future::block_on(self.wait())
    }

    /// Drop any pending value.
    pub fn clear(&self) {
        self.slot.reset();
    }
}

impl<T: Send> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}
