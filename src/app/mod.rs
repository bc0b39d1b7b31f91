//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules of the AquaWatch pipeline: sample
//! classification, edge-triggered alerting, and the acquisition cycle.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod acquisition;
pub mod analyzer;
pub mod ports;
pub mod sample;
