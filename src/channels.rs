//! Inter-task communication statics.
//!
//! The pipeline's shared cells live here so every task reaches them
//! without heap allocation or constructor plumbing.
//!
//! ```text
//! ┌─────────────┐  RawSample    ┌──────────────┐
//! │ Acquisition │──────────────▶│   Display    │
//! │             │  AlertVector  ├──────────────┤
//! │             │──────────────▶│  Handshake   │
//! └─────────────┘               └──────────────┘
//!        │ Notification (all producers)  ▲
//!        └──────────▶ NOTIFICATIONS ─────┘ (display drains)
//! ```

use crate::app::sample::{AlertVector, RawSample};
use crate::mailbox::Mailbox;
use crate::notifications::{MAX_NOTIFICATIONS, NotificationQueue};

/// Latest sample: acquisition → display.
pub static SAMPLE_MAILBOX: Mailbox<RawSample> = Mailbox::new();

/// Latest alert vector: acquisition → handshake.
pub static ALERT_MAILBOX: Mailbox<AlertVector> = Mailbox::new();

/// Operator notifications: every task → display.
pub static NOTIFICATIONS: NotificationQueue<MAX_NOTIFICATIONS> = NotificationQueue::new();
