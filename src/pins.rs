//! GPIO / peripheral pin assignments for the AquaWatch main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors: analog (ADC1)
// ---------------------------------------------------------------------------

/// PH-4502C probe output (GPIO 4 on ESP32-S3).
pub const PH_ADC1_CHANNEL: u32 = 3;
/// TDS meter output (GPIO 5 on ESP32-S3).
pub const TDS_ADC1_CHANNEL: u32 = 4;
/// NTC thermistor divider (GPIO 9 on ESP32-S3).
pub const TEMP_ADC1_CHANNEL: u32 = 8;

// ---------------------------------------------------------------------------
// FPGA link: data lines (outputs, HIGH = alert)
// ---------------------------------------------------------------------------

pub const LINK_TEMPERATURE_GPIO: i32 = 38;
pub const LINK_PH_GPIO: i32 = 39;
pub const LINK_TDS_GPIO: i32 = 40;
pub const LINK_BUTTON_GPIO: i32 = 41;

// ---------------------------------------------------------------------------
// FPGA link: control lines
// ---------------------------------------------------------------------------

/// Output: HIGH = data lines valid, please latch.
pub const LINK_REQUEST_GPIO: i32 = 42;
/// Input: HIGH = controller latched the data lines.
pub const LINK_ACK_GPIO: i32 = 2;
/// Output: LOW holds the controller in reset.
pub const LINK_RESET_GPIO: i32 = 47;
/// Input: HIGH once the controller is running.
pub const LINK_ALIVE_GPIO: i32 = 48;

// ---------------------------------------------------------------------------
// User buttons (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Button A: manual start, carried to the controller.
pub const BUTTON_MANUAL_GPIO: i32 = 15;
/// Button B: display page select.
pub const BUTTON_PAGE_GPIO: i32 = 16;
