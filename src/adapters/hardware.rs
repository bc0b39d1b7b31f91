//! Hardware adapter: bridges the board's sensors and button A to the
//! domain port traits.
//!
//! Owns the [`SensorHub`] and the manual-start button, exposing them
//! through [`SensorPort`] and [`ButtonPort`]. On non-espidf targets the
//! underlying ADC/GPIO reads come from the simulated level tables in
//! `hw_init`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::adapters::delay::{BoardDelay, board_delay};
use crate::app::ports::{ButtonId, ButtonPort, SensorPort};
use crate::drivers::button::DebouncedButton;
use crate::drivers::gpio::GpioInput;
use crate::pins::{PH_ADC1_CHANNEL, TDS_ADC1_CHANNEL, TEMP_ADC1_CHANNEL};
use crate::pins;
use crate::sensors::ph::PhSensor;
use crate::sensors::tds::TdsSensor;
use crate::sensors::temperature::TemperatureSensor;
use crate::sensors::{AdcChannel, AdcScale, RawSource, SensorHub};

/// Concrete adapter combining the sensors and button A.
pub struct HardwareAdapter<S, D, P> {
    sensors: SensorHub<S, D>,
    manual: DebouncedButton<P, D>,
}

/// The adapter as wired on the AquaWatch board.
pub type BoardHardware = HardwareAdapter<AdcChannel, BoardDelay, GpioInput>;

impl<S: RawSource, D: DelayNs, P: InputPin> HardwareAdapter<S, D, P> {
    pub fn new(sensors: SensorHub<S, D>, manual: DebouncedButton<P, D>) -> Self {
        Self { sensors, manual }
    }
}

impl BoardHardware {
    /// Build from the board pin map. `hw_init::init_peripherals()` must
    /// have configured the ADC and GPIO first.
    pub fn board() -> Self {
        let scale = AdcScale::ESP32_ADC1;
        let sensors = SensorHub::new(
            TemperatureSensor::new(AdcChannel::new(TEMP_ADC1_CHANNEL), scale),
            PhSensor::new(AdcChannel::new(PH_ADC1_CHANNEL), board_delay(), scale),
            TdsSensor::new(AdcChannel::new(TDS_ADC1_CHANNEL), board_delay(), scale),
        );
        let manual = DebouncedButton::new(
            ButtonId::Manual,
            GpioInput::new(pins::BUTTON_MANUAL_GPIO),
            board_delay(),
        );
        Self::new(sensors, manual)
    }
}

/// Button B as wired on the board.
pub fn board_page_button() -> DebouncedButton<GpioInput, BoardDelay> {
    DebouncedButton::new(
        ButtonId::Page,
        GpioInput::new(pins::BUTTON_PAGE_GPIO),
        board_delay(),
    )
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: RawSource, D: DelayNs, P: InputPin> SensorPort for HardwareAdapter<S, D, P> {
    fn read_temperature(&mut self) -> f32 {
        self.sensors.read_temperature()
    }

    fn read_ph(&mut self) -> f32 {
        self.sensors.read_ph()
    }

    fn read_tds(&mut self, current_temperature: f32) -> f32 {
        self.sensors.read_tds(current_temperature)
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<S: RawSource, D: DelayNs, P: InputPin> ButtonPort for HardwareAdapter<S, D, P> {
    fn id(&self) -> ButtonId {
        self.manual.id()
    }

    fn read_button(&mut self) -> bool {
        self.manual.read_button()
    }
}
