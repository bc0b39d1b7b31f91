//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC1 (pH/TDS/NTC)  |
//! |                | ButtonPort         | GPIO button A            |
//! | `log_display`  | DisplayPort        | Serial log output        |
//! | `delay`        | DelayNs            | FreeRTOS / thread sleep  |

pub mod delay;
pub mod hardware;
pub mod log_display;
