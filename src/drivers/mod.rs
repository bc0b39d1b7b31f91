//! Board drivers: peripheral initialisation, pins, buttons, task runtime.

pub mod button;
pub mod gpio;
pub mod hw_init;
pub mod task_pin;
pub mod watchdog;
