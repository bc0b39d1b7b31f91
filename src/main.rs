//! AquaWatch firmware entry point
//!
//! Hexagonal architecture with four core-pinned tasks.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogDisplay        GpioOutput/GpioInput │
//! │  (Sensor+ButtonPort)    (DisplayPort)     (FPGA link lines)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  AcquisitionLoop · AlertAnalyzer · HandshakeEngine     │    │
//! │  │  DisplayContext · NotificationQueue                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  core 0: acquire, paginate      core 1: handshake, display     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::{error, info};

use aquawatch::adapters::delay::link_delay;
use aquawatch::adapters::hardware::{BoardHardware, board_page_button};
use aquawatch::adapters::log_display::LogDisplay;
use aquawatch::config::SystemConfig;
use aquawatch::display::DisplayContext;
use aquawatch::drivers::gpio::{GpioInput, GpioOutput};
use aquawatch::drivers::hw_init;
use aquawatch::drivers::task_pin::spawn_task;
use aquawatch::error::{Error, Result as FwResult};
use aquawatch::handshake::{BringUpLines, HandshakeEngine, HandshakeLines};
use aquawatch::pins;
use aquawatch::tasks::{self, HandshakeTask};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AquaWatch v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration + peripherals ────────────────────────
    let config = SystemConfig::default();
    if let Err(e) = bring_up_board(&config) {
        error!("Startup failed: {}", e);
        return Err(e.into());
    }

    // ── 3. FPGA link ──────────────────────────────────────────
    let lines = HandshakeLines {
        temperature: GpioOutput::new(pins::LINK_TEMPERATURE_GPIO),
        ph: GpioOutput::new(pins::LINK_PH_GPIO),
        tds: GpioOutput::new(pins::LINK_TDS_GPIO),
        button: GpioOutput::new(pins::LINK_BUTTON_GPIO),
        request: GpioOutput::new(pins::LINK_REQUEST_GPIO),
        acknowledge: GpioInput::new(pins::LINK_ACK_GPIO),
    };
    let bring_up = BringUpLines {
        reset: GpioOutput::new(pins::LINK_RESET_GPIO),
        alive: GpioInput::new(pins::LINK_ALIVE_GPIO),
    };
    let engine = HandshakeEngine::new(lines, link_delay(), config.handshake)
        .map_err(Error::from)?;
    let link = HandshakeTask::new(engine, bring_up);

    // ── 4. Shared display ─────────────────────────────────────
    let display = Arc::new(Mutex::new(DisplayContext::new(
        LogDisplay::new(),
        config.thresholds,
    )));

    // ── 5. Tasks ──────────────────────────────────────────────
    let t = config.tasks;
    let thresholds = config.thresholds;

    let acquire = spawn_task(&t.acquisition, move || {
        tasks::run_acquisition(t.acquisition, BoardHardware::board(), thresholds);
    });
    let handshake = spawn_task(&t.handshake, move || {
        link.run();
    });
    let display_for_task = Arc::clone(&display);
    let render = spawn_task(&t.display, move || {
        tasks::run_display(t.display, display_for_task);
    });
    let paginate = spawn_task(&t.pagination, move || {
        tasks::run_pagination(t.pagination, board_page_button(), display);
    });

    info!("System ready.");

    for handle in [acquire, handshake, render, paginate] {
        if handle.join().is_err() {
            error!("A task panicked");
        }
    }
    Ok(())
}

/// Validate the configuration and configure ADC/GPIO.
fn bring_up_board(config: &SystemConfig) -> FwResult<()> {
    config.validate()?;
    info!(
        "Config: T=[{}, {}]\u{00b0}C pH=[{}, {}] HS timeout={}ms x{}",
        config.thresholds.min_temperature_c,
        config.thresholds.max_temperature_c,
        config.thresholds.min_ph,
        config.thresholds.max_ph,
        config.handshake.ack_timeout_ms,
        config.handshake.max_attempts,
    );
    hw_init::init_peripherals()?;
    Ok(())
}
