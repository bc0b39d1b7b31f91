//! FPGA link bring-up.
//!
//! RESET is held low while ALIVE is polled. The wait is unbounded: the
//! monitor has nothing to deliver to until the controller is up.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, info};

use super::lines::BringUpLines;
use crate::app::ports::NotificationSink;
use crate::error::HandshakeError;
use crate::notifications::Notification;

/// Bring the controller out of reset. Returns the number of ALIVE polls
/// that came back low.
pub fn bring_up<O, I, D>(
    lines: &mut BringUpLines<O, I>,
    delay: &mut D,
    poll_ms: u32,
    sink: &impl NotificationSink,
) -> Result<u32, HandshakeError>
where
    O: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    lines.hold_reset()?;
    info!("FPGA link: holding RESET, waiting for ALIVE");

    let mut polls: u32 = 0;
    while !lines.alive()? {
        polls = polls.saturating_add(1);
        if polls % 50 == 0 {
            debug!("FPGA link: still waiting for ALIVE ({} polls)", polls);
        }
        delay.delay_ms(poll_ms);
    }

    lines.release_reset()?;
    info!("FPGA link: controller alive after {} polls", polls);
    sink.notify(Notification::info("FP Connected"));
    Ok(polls)
}
