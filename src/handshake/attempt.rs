//! Per-delivery handshake bookkeeping.
//!
//! A [`HandshakeAttempt`] is created fresh for each delivery and dropped
//! once it succeeds or fails, so no state leaks from one vector to the next.
//!
//! ```text
//! Idle ─▶ LinesSet ─▶ RequestSent ─▶ AwaitAck ─┬─▶ AckReceived ─▶ AwaitAckClear ─▶ Idle
//!  ▲                                           │
//!  └──────────────── timeout (retry) ──────────┘
//! ```

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LinesSet,
    RequestSent,
    AwaitAck,
    AckReceived,
    AwaitAckClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeAttempt {
    attempt_count: u8,
    phase: Phase,
    /// Time spent polling in the current attempt.
    elapsed_ms: u32,
}

impl HandshakeAttempt {
    pub fn new() -> Self {
        Self {
            attempt_count: 0,
            phase: Phase::Idle,
            elapsed_ms: 0,
        }
    }

    /// Start the next attempt; the wait budget restarts from zero.
    pub fn begin(&mut self) {
        self.attempt_count = self.attempt_count.saturating_add(1);
        self.phase = Phase::Idle;
        self.elapsed_ms = 0;
    }

    pub fn enter(&mut self, phase: Phase) {
        trace!(
            "HS attempt {}: {:?} -> {:?} (+{}ms)",
            self.attempt_count, self.phase, phase, self.elapsed_ms
        );
        self.phase = phase;
    }

    pub fn wait(&mut self, ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
    }

    pub fn attempt_count(&self) -> u8 {
        self.attempt_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Attempts beyond the first.
    pub fn retries(&self) -> u8 {
        self.attempt_count.saturating_sub(1)
    }
}

impl Default for HandshakeAttempt {
    fn default() -> Self {
        Self::new()
    }
}
