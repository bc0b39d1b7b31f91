//! Delay providers.
//!
//! On the device the drivers use `esp-idf-hal`'s `FreeRtos` / `Delay`
//! directly. Host builds use [`ThreadDelay`], which sleeps the calling
//! thread.

use embedded_hal::delay::DelayNs;

/// `std::thread::sleep`-backed delay for host simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Delay type used by the board drivers on this target.
#[cfg(target_os = "espidf")]
pub type BoardDelay = esp_idf_hal::delay::FreeRtos;

#[cfg(not(target_os = "espidf"))]
pub type BoardDelay = ThreadDelay;

/// Sub-tick delay for the FPGA handshake (busy-waits short intervals).
#[cfg(target_os = "espidf")]
pub fn link_delay() -> esp_idf_hal::delay::Delay {
    esp_idf_hal::delay::Delay::new_default()
}

#[cfg(not(target_os = "espidf"))]
pub fn link_delay() -> ThreadDelay {
    ThreadDelay
}

/// Delay used by sensors and buttons.
pub fn board_delay() -> BoardDelay {
    #[cfg(target_os = "espidf")]
    {
        esp_idf_hal::delay::FreeRtos
    }
    #[cfg(not(target_os = "espidf"))]
    {
        ThreadDelay
    }
}
