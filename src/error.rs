//! Unified error types for the AquaWatch firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! bring-up path's error handling uniform. All variants are `Copy`.
//!
//! Notifications, not errors, are the operator-facing channel: the
//! handshake task turns a [`HandshakeError`] into an Error notification and
//! carries on with the next delivery.

use core::fmt;

use embedded_hal::digital::ErrorKind;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The FPGA link failed.
    Handshake(HandshakeError),
    /// Configuration failed validation.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handshake(e) => write!(f, "handshake: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Handshake errors
// ---------------------------------------------------------------------------

/// Terminal outcomes of one delivery. A single ACK timeout is not here:
/// it is retried inside the delivery and only surfaces as
/// [`HandshakeError::DeliveryExhausted`] once the retry bound is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeError {
    /// ACK never rose within the budget on any of `attempts` attempts.
    DeliveryExhausted { attempts: u8 },
    /// ACK rose but never fell after REQUEST was lowered.
    LinkWedged,
    /// A line could not be driven or sampled.
    Gpio(ErrorKind),
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeliveryExhausted { attempts } => {
                write!(f, "no acknowledge after {attempts} attempts")
            }
            Self::LinkWedged => write!(f, "controller never released acknowledge"),
            Self::Gpio(kind) => write!(f, "GPIO error: {kind}"),
        }
    }
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self {
        Self::Handshake(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names it.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
