//! Acquisition → mailboxes → consumers, wired the way the tasks wire them
//! but with local mailboxes and queues so tests stay independent.

use std::sync::Mutex;

use crate::mock_hw::{
    ControllerModel, DisplayCall, MockBoard, MockButton, MockDisplay, MockLink, RecordingDelay,
    RecordingSink, ScriptedButtonPin, link, sample,
};

use aquawatch::app::acquisition::AcquisitionLoop;
use aquawatch::app::analyzer::AlertAnalyzer;
use aquawatch::app::ports::ButtonId;
use aquawatch::app::sample::{AlertVector, RawSample};
use aquawatch::config::{AlertThresholds, HandshakeConfig};
use aquawatch::display::{DisplayContext, Screen};
use aquawatch::drivers::button::DebouncedButton;
use aquawatch::handshake::HandshakeEngine;
use aquawatch::mailbox::Mailbox;
use aquawatch::notifications::{MAX_NOTIFICATIONS, Notification, NotificationQueue, Severity};
use aquawatch::tasks::paginate_once;

fn acquisition() -> AcquisitionLoop {
    AcquisitionLoop::new(AlertAnalyzer::new(AlertThresholds::default()))
}

// ── Acquisition ───────────────────────────────────────────────

#[test]
fn cycle_publishes_sample_and_vector() {
    let mut board = MockBoard::new([sample(26.0, 7.0, 900.0)]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let sink = RecordingSink::new();

    let report = acquisition().run_cycle(&mut board, &sink, &samples, &alerts);

    assert_eq!(report.cycle, 1);
    assert_eq!(samples.try_take(), Some(sample(26.0, 7.0, 900.0)));
    let vector = alerts.try_take().unwrap();
    assert!(vector.tds_alert);
    assert!(!vector.temperature_alert && !vector.ph_alert);
    assert_eq!(sink.messages(), ["TDS High!"]);
}

#[test]
fn sensors_are_read_in_order_with_same_cycle_compensation() {
    let mut board = MockBoard::new([sample(25.5, 7.0, 300.0), sample(27.25, 7.0, 300.0)]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let sink = RecordingSink::new();
    let mut acq = acquisition();

    acq.run_cycle(&mut board, &sink, &samples, &alerts);
    acq.run_cycle(&mut board, &sink, &samples, &alerts);

    assert_eq!(board.tds_compensation, [25.5, 27.25]);
    assert_eq!(
        &board.reads[..4],
        ["temperature", "ph", "tds", "button"]
    );
    assert_eq!(acq.cycles(), 2);
}

#[test]
fn manual_start_precedes_alert_notifications() {
    let pressed = RawSample {
        button: true,
        ..sample(20.0, 7.0, 300.0)
    };
    let mut board = MockBoard::new([pressed]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let sink = RecordingSink::new();

    let report = acquisition().run_cycle(&mut board, &sink, &samples, &alerts);

    assert!(report.vector.button);
    assert_eq!(sink.messages(), ["Manual start", "Temp Low!"]);
    assert_eq!(sink.count(Severity::Info), 1);
    assert_eq!(sink.count(Severity::Alert), 1);
}

#[test]
fn persistent_fault_is_announced_once() {
    let mut board = MockBoard::new([
        sample(20.0, 7.0, 300.0),
        sample(20.0, 7.0, 300.0),
        sample(26.0, 7.0, 300.0),
        sample(20.0, 7.0, 300.0),
    ]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let sink = RecordingSink::new();
    let mut acq = acquisition();

    for _ in 0..4 {
        acq.run_cycle(&mut board, &sink, &samples, &alerts);
    }

    assert_eq!(sink.messages(), ["Temp Low!", "Temp Low!"]);
}

#[test]
fn slow_consumer_sees_only_the_latest_cycle() {
    let mut board = MockBoard::new([
        sample(20.0, 7.0, 300.0),
        sample(26.0, 7.0, 300.0),
        sample(26.0, 9.0, 300.0),
    ]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let sink = RecordingSink::new();
    let mut acq = acquisition();

    for _ in 0..3 {
        acq.run_cycle(&mut board, &sink, &samples, &alerts);
    }

    assert_eq!(samples.try_take(), Some(sample(26.0, 9.0, 300.0)));
    assert_eq!(samples.try_take(), None);
    let latest = alerts.try_take().unwrap();
    assert!(latest.ph_alert && !latest.temperature_alert);
}

// ── Acquisition → handshake ───────────────────────────────────

#[test]
fn published_vector_reaches_the_controller() {
    let mut board = MockBoard::new([sample(20.0, 5.5, 900.0)]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let sink = RecordingSink::new();
    acquisition().run_cycle(&mut board, &sink, &samples, &alerts);

    let MockLink { bus, lines, delay, .. } = link(ControllerModel::AckOnAttempt(1));
    let mut engine = HandshakeEngine::new(lines, delay, HandshakeConfig::default()).unwrap();
    let vector = alerts.try_take().unwrap();
    engine.deliver(vector, &sink).unwrap();

    assert_eq!(bus.borrow().latched, vec![[true, true, true, false]]);
    assert_eq!(sink.messages(), ["Temp Low!", "PH Acidic!", "TDS High!"]);
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn display_waits_for_first_sample() {
    let mut ctx = DisplayContext::new(MockDisplay::default(), AlertThresholds::default());
    let samples: Mailbox<RawSample> = Mailbox::new();
    let queue = NotificationQueue::<MAX_NOTIFICATIONS>::new();

    assert!(!ctx.refresh(&samples, &queue));
    assert!(ctx.surface().calls.is_empty());
}

#[test]
fn display_draws_latest_sample_on_each_page() {
    let mut board = MockBoard::new([sample(26.0, 9.0, 300.0)]);
    let samples = Mailbox::new();
    let alerts = Mailbox::new();
    let queue = NotificationQueue::<MAX_NOTIFICATIONS>::new();
    acquisition().run_cycle(&mut board, &queue, &samples, &alerts);

    let mut ctx = DisplayContext::new(MockDisplay::default(), AlertThresholds::default());
    assert!(ctx.refresh(&samples, &queue));
    ctx.advance_page();
    // Mailbox is empty now; the retained sample is redrawn.
    assert!(ctx.refresh(&samples, &queue));

    let calls = &ctx.surface().calls;
    assert_eq!(calls[0], DisplayCall::Summary(sample(26.0, 9.0, 300.0)));
    assert_eq!(
        calls[1],
        DisplayCall::Metric {
            label: "pH".to_string(),
            value: 9.0,
            alert: true,
        }
    );
    assert!(queue.is_empty(), "refresh drains pending notifications");
    assert_eq!(ctx.history().len(), 1);
}

#[test]
fn notifications_page_lists_history_oldest_first() {
    let samples: Mailbox<RawSample> = Mailbox::new();
    let queue = NotificationQueue::<MAX_NOTIFICATIONS>::new();
    queue.push(Notification::info("FP Connected"));
    queue.push(Notification::error("HS Failed!"));

    let mut ctx = DisplayContext::new(MockDisplay::default(), AlertThresholds::default());
    while ctx.screen() != Screen::Notifications {
        ctx.advance_page();
    }
    assert!(ctx.refresh(&samples, &queue));

    let Some(DisplayCall::Notifications(list)) = ctx.surface().calls.last() else {
        panic!("expected a notifications draw");
    };
    assert_eq!(list.len(), 2);
    assert!(list[0].contains("FP Connected"));
    assert!(list[1].contains("HS Failed!"));
}

// ── Pagination ────────────────────────────────────────────────

fn shared_display() -> Mutex<DisplayContext<MockDisplay>> {
    Mutex::new(DisplayContext::new(
        MockDisplay::default(),
        AlertThresholds::default(),
    ))
}

#[test]
fn pagination_advances_on_every_reported_press() {
    let display = shared_display();
    let mut button = MockButton::new([true, true, false, true]);

    let advanced: Vec<bool> = (0..4)
        .map(|_| paginate_once(&mut button, &display))
        .collect();

    assert_eq!(advanced, [true, true, false, true]);
    assert_eq!(display.lock().unwrap().screen(), Screen::Temperature);
}

#[test]
fn back_to_back_presses_on_the_debounced_button_both_count() {
    let display = shared_display();
    // press, hold, release, press, release
    let pin = ScriptedButtonPin::new([true, true, false, true, false]);
    let mut button = DebouncedButton::new(ButtonId::Page, pin, RecordingDelay::default());

    let advanced = [
        paginate_once(&mut button, &display),
        paginate_once(&mut button, &display),
    ];

    assert_eq!(advanced, [true, true]);
    assert_eq!(display.lock().unwrap().screen(), Screen::Tds);
    assert!(!paginate_once(&mut button, &display));
}

#[test]
fn pagination_wraps_back_to_summary() {
    let display = shared_display();
    let mut button = MockButton::new([true; 5]);

    for _ in 0..Screen::ALL.len() {
        paginate_once(&mut button, &display);
    }

    assert_eq!(display.lock().unwrap().screen(), Screen::Summary);
}

// ── Notification queue ────────────────────────────────────────

#[test]
fn overflowing_queue_keeps_newest_and_counts_drops() {
    let queue = NotificationQueue::<MAX_NOTIFICATIONS>::new();
    let labels = ["N0", "N1", "N2", "N3", "N4", "N5", "N6"];
    for label in labels {
        queue.push(Notification::info(label));
    }

    assert_eq!(queue.len(), MAX_NOTIFICATIONS);
    assert_eq!(queue.dropped(), 2);
    let mut kept = Vec::new();
    queue.drain(|n| kept.push(n.message.to_string()));
    assert_eq!(kept, ["N2", "N3", "N4", "N5", "N6"]);
}

#[test]
fn vector_mailbox_is_shareable_across_threads() {
    static ALERTS: Mailbox<AlertVector> = Mailbox::new();
    let producer = std::thread::spawn(|| {
        ALERTS.publish(AlertVector {
            ph_alert: true,
            ..AlertVector::CLEAR
        });
    });
    let received = ALERTS.wait_blocking();
    producer.join().unwrap();
    assert!(received.ph_alert);
}
