//! Mock hardware for integration tests.
//!
//! The FPGA link is modelled as a shared [`Bus`]: mock pins write and read
//! line levels on it, [`MockDelay`] advances its virtual clock, and a
//! [`ControllerModel`] decides how ACKNOWLEDGE and ALIVE respond. Sensors,
//! buttons, the display and the notification sink record every call.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use aquawatch::app::ports::{ButtonId, ButtonPort, DisplayPort, NotificationSink, SensorPort};
use aquawatch::app::sample::RawSample;
use aquawatch::handshake::{BringUpLines, HandshakeLines};
use aquawatch::notifications::{Notification, Severity};

// ── Line bus ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Temperature,
    Ph,
    Tds,
    Button,
    Request,
    Reset,
}

impl Line {
    fn index(self) -> usize {
        self as usize
    }
}

/// How the simulated controller answers REQUEST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerModel {
    /// ACK follows REQUEST from the Nth rising edge on (1-based).
    AckOnAttempt(u32),
    /// ACK never rises.
    NeverAck,
    /// ACK rises on the first request and never falls.
    Wedged,
    /// ACK rises once REQUEST has been high for `ack_after_ms`, and falls
    /// once REQUEST has been low for `release_after_ms`.
    Timed {
        ack_after_ms: u64,
        release_after_ms: u64,
    },
}

#[derive(Debug)]
pub struct Bus {
    pub levels: [bool; 6],
    pub model: ControllerModel,
    pub request_rises: u32,
    /// Data lines as seen at each acknowledged REQUEST edge.
    pub latched: Vec<[bool; 4]>,
    /// Virtual time (ns) advanced by `MockDelay`.
    pub now_ns: u64,
    /// ALIVE reads high once `now_ns` reaches this.
    pub alive_at_ns: u64,
    /// Every output write, in order.
    pub writes: Vec<(Line, bool)>,
    /// Make every output write fail.
    pub fail_writes: bool,
    /// `now_ns` at the last REQUEST rising edge.
    pub request_rose_ns: u64,
    /// `now_ns` at the last REQUEST falling edge.
    pub request_fell_ns: u64,
    /// ACK level at the moment REQUEST last fell.
    pub ack_at_fall: bool,
}

impl Bus {
    pub fn level(&self, line: Line) -> bool {
        self.levels[line.index()]
    }

    pub fn data_levels(&self) -> [bool; 4] {
        [
            self.level(Line::Temperature),
            self.level(Line::Ph),
            self.level(Line::Tds),
            self.level(Line::Button),
        ]
    }

    pub fn all_parked(&self) -> bool {
        !self.level(Line::Request) && self.data_levels() == [false; 4]
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns / 1_000_000
    }

    fn ack(&self) -> bool {
        let request = self.level(Line::Request);
        match self.model {
            ControllerModel::AckOnAttempt(n) => request && self.request_rises >= n,
            ControllerModel::NeverAck => false,
            ControllerModel::Wedged => self.request_rises >= 1,
            ControllerModel::Timed {
                ack_after_ms,
                release_after_ms,
            } => {
                if request {
                    self.now_ns - self.request_rose_ns >= ack_after_ms * 1_000_000
                } else {
                    self.ack_at_fall
                        && self.now_ns - self.request_fell_ns < release_after_ms * 1_000_000
                }
            }
        }
    }

    fn acks_edge(&self, rise: u32) -> bool {
        match self.model {
            ControllerModel::AckOnAttempt(n) => rise >= n,
            ControllerModel::NeverAck => false,
            ControllerModel::Wedged => rise == 1,
            ControllerModel::Timed { .. } => true,
        }
    }
}

pub type SharedBus = Rc<RefCell<Bus>>;

pub fn bus(model: ControllerModel) -> SharedBus {
    Rc::new(RefCell::new(Bus {
        levels: [false; 6],
        model,
        request_rises: 0,
        latched: Vec::new(),
        now_ns: 0,
        alive_at_ns: 0,
        writes: Vec::new(),
        fail_writes: false,
        request_rose_ns: 0,
        request_fell_ns: 0,
        ack_at_fall: false,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct MockOut {
    bus: SharedBus,
    line: Line,
}

impl MockOut {
    fn write(&mut self, high: bool) -> Result<(), MockPinError> {
        let mut b = self.bus.borrow_mut();
        if b.fail_writes {
            return Err(MockPinError);
        }
        let was = b.levels[self.line.index()];
        if self.line == Line::Request && !high && was {
            let acked = b.ack();
            b.ack_at_fall = acked;
            b.request_fell_ns = b.now_ns;
        }
        b.levels[self.line.index()] = high;
        b.writes.push((self.line, high));
        if self.line == Line::Request && high && !was {
            b.request_rises += 1;
            b.request_rose_ns = b.now_ns;
            let rise = b.request_rises;
            if b.acks_edge(rise) {
                let data = b.data_levels();
                b.latched.push(data);
            }
        }
        Ok(())
    }
}

impl ErrorType for MockOut {
    type Error = MockPinError;
}

impl OutputPin for MockOut {
    fn set_low(&mut self) -> Result<(), MockPinError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), MockPinError> {
        self.write(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InLine {
    Ack,
    Alive,
}

pub struct MockIn {
    bus: SharedBus,
    line: InLine,
}

impl ErrorType for MockIn {
    type Error = MockPinError;
}

impl InputPin for MockIn {
    fn is_high(&mut self) -> Result<bool, MockPinError> {
        let b = self.bus.borrow();
        Ok(match self.line {
            InLine::Ack => b.ack(),
            InLine::Alive => b.now_ns >= b.alive_at_ns,
        })
    }

    fn is_low(&mut self) -> Result<bool, MockPinError> {
        self.is_high().map(|h| !h)
    }
}

/// Advances the bus clock instead of sleeping.
pub struct MockDelay {
    bus: SharedBus,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.borrow_mut().now_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.borrow_mut().now_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.bus.borrow_mut().now_ns += u64::from(ms) * 1_000_000;
    }
}

pub struct MockLink {
    pub bus: SharedBus,
    pub lines: HandshakeLines<MockOut, MockIn>,
    pub bring_up: BringUpLines<MockOut, MockIn>,
    pub delay: MockDelay,
}

pub fn link(model: ControllerModel) -> MockLink {
    let bus = bus(model);
    let out = |line| MockOut {
        bus: Rc::clone(&bus),
        line,
    };
    let lines = HandshakeLines {
        temperature: out(Line::Temperature),
        ph: out(Line::Ph),
        tds: out(Line::Tds),
        button: out(Line::Button),
        request: out(Line::Request),
        acknowledge: MockIn {
            bus: Rc::clone(&bus),
            line: InLine::Ack,
        },
    };
    let bring_up = BringUpLines {
        reset: out(Line::Reset),
        alive: MockIn {
            bus: Rc::clone(&bus),
            line: InLine::Alive,
        },
    };
    let delay = MockDelay {
        bus: Rc::clone(&bus),
    };
    MockLink {
        bus,
        lines,
        bring_up,
        delay,
    }
}

// ── Notification sink ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub received: RefCell<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.received.borrow().iter().map(|n| n.message.to_string()).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.received.borrow().iter().filter(|n| n.severity == severity).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}

// ── Sensors + button A ────────────────────────────────────────

/// Replays scripted samples, one per acquisition cycle.
pub struct MockBoard {
    script: VecDeque<RawSample>,
    current: RawSample,
    /// Temperature passed to each `read_tds` call.
    pub tds_compensation: Vec<f32>,
    /// Sensor reads in call order.
    pub reads: Vec<&'static str>,
}

impl MockBoard {
    pub fn new(samples: impl IntoIterator<Item = RawSample>) -> Self {
        Self {
            script: samples.into_iter().collect(),
            current: RawSample::default(),
            tds_compensation: Vec::new(),
            reads: Vec::new(),
        }
    }
}

impl SensorPort for MockBoard {
    fn read_temperature(&mut self) -> f32 {
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
        self.reads.push("temperature");
        self.current.temperature
    }

    fn read_ph(&mut self) -> f32 {
        self.reads.push("ph");
        self.current.ph
    }

    fn read_tds(&mut self, current_temperature: f32) -> f32 {
        self.reads.push("tds");
        self.tds_compensation.push(current_temperature);
        self.current.tds
    }
}

impl ButtonPort for MockBoard {
    fn id(&self) -> ButtonId {
        ButtonId::Manual
    }

    fn read_button(&mut self) -> bool {
        self.reads.push("button");
        self.current.button
    }
}

/// Button B replaying a fixed sequence of debounced reads (one `true`
/// per press), then idle.
pub struct MockButton {
    presses: VecDeque<bool>,
}

impl MockButton {
    pub fn new(presses: impl IntoIterator<Item = bool>) -> Self {
        Self {
            presses: presses.into_iter().collect(),
        }
    }
}

impl ButtonPort for MockButton {
    fn id(&self) -> ButtonId {
        ButtonId::Page
    }

    fn read_button(&mut self) -> bool {
        self.presses.pop_front().unwrap_or(false)
    }
}

/// Active-low button pin replaying scripted "pressed" reads, then
/// released. Pair with `DebouncedButton` to drive the real driver.
pub struct ScriptedButtonPin {
    pressed: VecDeque<bool>,
}

impl ScriptedButtonPin {
    pub fn new(pressed: impl IntoIterator<Item = bool>) -> Self {
        Self {
            pressed: pressed.into_iter().collect(),
        }
    }
}

impl ErrorType for ScriptedButtonPin {
    type Error = MockPinError;
}

impl InputPin for ScriptedButtonPin {
    fn is_high(&mut self) -> Result<bool, MockPinError> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, MockPinError> {
        Ok(self.pressed.pop_front().unwrap_or(false))
    }
}

/// Delay that only records how long it was asked to wait.
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ms: u32,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Summary(RawSample),
    Metric {
        label: String,
        value: f32,
        alert: bool,
    },
    Notifications(Vec<String>),
}

#[derive(Default)]
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
}

impl DisplayPort for MockDisplay {
    fn render_summary(&mut self, sample: &RawSample) {
        self.calls.push(DisplayCall::Summary(*sample));
    }

    fn render_metric(&mut self, label: &str, _unit: &str, value: f32, alert: bool) {
        self.calls.push(DisplayCall::Metric {
            label: label.to_string(),
            value,
            alert,
        });
    }

    fn render_notifications(&mut self, list: &[Notification]) {
        self.calls.push(DisplayCall::Notifications(list.iter().map(|n| n.to_string()).collect()));
    }
}

pub fn sample(temperature: f32, ph: f32, tds: f32) -> RawSample {
    RawSample {
        temperature,
        ph,
        tds,
        button: false,
    }
}
