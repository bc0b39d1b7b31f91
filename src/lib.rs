//! AquaWatch firmware library.
//!
//! Exposes the pipeline modules for the device binary and for host-side
//! integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; host builds swap in
//! simulated ADC/GPIO levels.

#![deny(unused_must_use)]

pub mod app;
pub mod channels;
pub mod config;
pub mod display;
pub mod error;
pub mod handshake;
pub mod mailbox;
pub mod notifications;
pub mod pins;
pub mod tasks;

pub mod adapters;
pub mod drivers;
pub mod sensors;
