//! Status display state and page selection.
//!
//! [`DisplayContext`] is the single owner of the display surface. The
//! display task refreshes it periodically and the pagination task advances
//! its page. Both reach it through one mutex, held for one draw.
//!
//! ```text
//! SAMPLE_MAILBOX ──take──┐
//!                        ├──▶ DisplayContext ──draw──▶ DisplayPort
//! NOTIFICATIONS ──drain──┘         ▲
//!                                  │ advance_page()
//!                        pagination task (button B)
//! ```

use crate::app::ports::DisplayPort;
use crate::app::sample::RawSample;
use crate::config::AlertThresholds;
use crate::mailbox::Mailbox;
use crate::notifications::{MAX_NOTIFICATIONS, NotificationHistory, NotificationQueue};

/// Display pages, in button-B order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Summary,
    Ph,
    Tds,
    Temperature,
    Notifications,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Summary,
        Screen::Ph,
        Screen::Tds,
        Screen::Temperature,
        Screen::Notifications,
    ];

    /// Following page, wrapping after the notifications page.
    pub fn next(self) -> Self {
        match self {
            Screen::Summary => Screen::Ph,
            Screen::Ph => Screen::Tds,
            Screen::Tds => Screen::Temperature,
            Screen::Temperature => Screen::Notifications,
            Screen::Notifications => Screen::Summary,
        }
    }
}

pub struct DisplayContext<D> {
    surface: D,
    screen: Screen,
    latest: Option<RawSample>,
    history: NotificationHistory<MAX_NOTIFICATIONS>,
    thresholds: AlertThresholds,
}

impl<D: DisplayPort> DisplayContext<D> {
    pub fn new(surface: D, thresholds: AlertThresholds) -> Self {
        Self {
            surface,
            screen: Screen::default(),
            latest: None,
            history: NotificationHistory::new(),
            thresholds,
        }
    }

    /// Pull fresh data and draw the current page.
    ///
    /// Returns `false` if the page had nothing to draw yet.
    pub fn refresh<const N: usize>(
        &mut self,
        samples: &Mailbox<RawSample>,
        queue: &NotificationQueue<N>,
    ) -> bool {
        if let Some(sample) = samples.try_take() {
            self.latest = Some(sample);
        }
        queue.drain(|n| self.history.record(n));
        self.draw()
    }

    /// Move to the next page and return it. Drawing waits for the next refresh.
    pub fn advance_page(&mut self) -> Screen {
        self.screen = self.screen.next();
        log::debug!("Display: page -> {:?}", self.screen);
        self.screen
    }

    fn draw(&mut self) -> bool {
        if self.screen == Screen::Notifications {
            self.surface.render_notifications(self.history.as_slice());
            return true;
        }

        let Some(sample) = self.latest else {
            return false;
        };
        let t = &self.thresholds;
        match self.screen {
            Screen::Summary => self.surface.render_summary(&sample),
            Screen::Ph => {
                self.surface.render_metric("pH", "", sample.ph, t.ph_alert(sample.ph));
            }
            Screen::Tds => {
                self.surface.render_metric("TDS", "ppm", sample.tds, t.tds_alert(&sample));
            }
            Screen::Temperature => {
                self.surface.render_metric(
                    "Temp",
                    "\u{00b0}C",
                    sample.temperature,
                    t.temperature_alert(sample.temperature),
                );
            }
            Screen::Notifications => {}
        }
        true
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn latest(&self) -> Option<RawSample> {
        self.latest
    }

    pub fn history(&self) -> &NotificationHistory<MAX_NOTIFICATIONS> {
        &self.history
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }
}
