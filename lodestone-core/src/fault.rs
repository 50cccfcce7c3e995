//! Uncaught exception reporting
//!
//! The only path by which a script error becomes visible. A thrown value
//! is rendered to the display and the serial log, then the reporter blocks
//! until the user presses any key. The deliberate-exit sentinel is not a
//! failure and is dropped silently.

use alloc::format;
use alloc::string::{String, ToString};

use lodestone_display::{DisplayBackend, Screen, TextStyle};
use lodestone_hal::{AnyKey, Clock};

use crate::config::FaultTiming;
use crate::engine::Engine;
use crate::error::{BridgeError, SCRIPT_EXIT_MESSAGE};
use crate::lazy::LazyInit;
use crate::value::Value;

/// Headline used when nothing better can be extracted
pub const FALLBACK_HEADLINE: &str = "JS Error";

/// Title row text
pub const TITLE: &str = "Error";

/// Row the body text starts on, below the double-height title
const BODY_ROW: usize = 2;

/// An uncaught exception, copied out of the engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exception {
    /// `message` property, if a string
    pub message: Option<String>,
    /// `stack` property, if a string
    pub stack: Option<String>,
    /// String form of the thrown value
    pub text: Option<String>,
}

impl Exception {
    /// Copy the interesting parts of a thrown value
    pub fn from_value<E: Engine + ?Sized>(engine: &mut E, thrown: &Value) -> Self {
        let (message, stack) = match thrown {
            Value::Object(obj) => {
                let message = engine.get(*obj, "message");
                let stack = engine.get(*obj, "stack");
                (message.as_str().map(String::from), stack.as_str().map(String::from))
            }
            _ => (None, None),
        };
        let text = match thrown {
            Value::String(s) => Some(s.clone()),
            other => engine.to_string(other),
        };
        Self { message, stack, text }
    }

    /// Exception for an error raised by a native call
    pub fn from_error(err: &BridgeError) -> Self {
        Self {
            message: Some(err.to_string()),
            stack: None,
            text: Some(format!("{}: {}", err.kind.error_class(), err)),
        }
    }

    /// Thrown by `exit()`
    pub fn is_script_exit(&self) -> bool {
        self.message.as_deref() == Some(SCRIPT_EXIT_MESSAGE)
    }

    /// First line of the report: the message, else the string form
    pub fn headline(&self) -> &str {
        self.message
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or(FALLBACK_HEADLINE)
    }

    /// Second part of the report: the stack, else the string form
    pub fn detail(&self) -> &str {
        self.stack.as_deref().or(self.text.as_deref()).unwrap_or("")
    }
}

/// Reporter states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReporterState {
    #[default]
    Idle,
    /// Diagnostic on screen, waiting for acknowledgment
    Reporting,
}

/// Reporter inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReporterEvent {
    /// An exception escaped the script; `exit` if it was the sentinel
    Thrown { exit: bool },
    /// Any key pressed
    Acknowledged,
}

impl ReporterState {
    pub fn transition(self, event: ReporterEvent) -> Self {
        use ReporterEvent::*;
        use ReporterState::*;

        match (self, event) {
            (Idle, Thrown { exit: true }) => Idle,
            (Idle, Thrown { exit: false }) => Reporting,
            (Reporting, Acknowledged) => Idle,
            (state, _) => state,
        }
    }
}

/// What happened to a reported exception
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Sentinel exit; nothing shown
    Suppressed,
    /// Shown and acknowledged by the user
    Acknowledged,
}

/// Renders uncaught exceptions and waits for acknowledgment
pub struct FaultReporter<D, W, K, C> {
    display: D,
    serial: W,
    keys: K,
    clock: C,
    timing: FaultTiming,
    state: ReporterState,
    screen: Screen,
    renders: u32,
}

impl<D, W, K, C> FaultReporter<D, W, K, C>
where
    D: DisplayBackend,
    W: embedded_io::Write,
    K: AnyKey,
    C: Clock,
{
    pub fn new(display: D, serial: W, keys: K, clock: C, timing: FaultTiming) -> Self {
        Self {
            display,
            serial,
            keys,
            clock,
            timing,
            state: ReporterState::Idle,
            screen: Screen::new(),
            renders: 0,
        }
    }

    pub fn state(&self) -> ReporterState {
        self.state
    }

    /// Number of diagnostics rendered so far
    pub fn renders(&self) -> u32 {
        self.renders
    }

    /// Last composed screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Report one uncaught exception
    ///
    /// Blocks until a key is pressed unless the exception is the exit
    /// sentinel. `touch_bus` brings up the input hardware on first use.
    pub fn report(&mut self, touch_bus: &LazyInit, exception: &Exception) -> Outcome {
        self.state = self.state.transition(ReporterEvent::Thrown {
            exit: exception.is_script_exit(),
        });
        if self.state == ReporterState::Idle {
            info!("script exited");
            return Outcome::Suppressed;
        }

        error!("uncaught: {=str}", exception.headline());
        self.render(exception);
        self.write_serial(exception);

        self.clock.delay_ms(self.timing.settle_ms);
        let keys = &mut self.keys;
        touch_bus.ensure(|| keys.begin());
        while !self.keys.any_key_pressed() {
            self.clock.delay_ms(self.timing.ack_poll_ms);
        }

        self.state = self.state.transition(ReporterEvent::Acknowledged);
        Outcome::Acknowledged
    }

    fn render(&mut self, exception: &Exception) {
        let (cols, _) = self.display.dimensions();
        self.screen = Screen::with_width(cols as usize);
        self.screen.set_line(0, TITLE, TextStyle::Title);
        self.screen.set_cursor(BODY_ROW);
        self.screen.write_wrapped(exception.headline(), TextStyle::Body);
        self.screen.write_wrapped(exception.detail(), TextStyle::Body);
        if self.screen.is_truncated() {
            warn!("fault report truncated on display");
        }
        if let Err(_err) = self.screen.render(&mut self.display) {
            error!("fault display failed: {}", _err);
        }
        self.renders += 1;
    }

    fn write_serial(&mut self, exception: &Exception) {
        let result = self
            .serial
            .write_all(exception.headline().as_bytes())
            .and_then(|_| self.serial.write_all(b"\n"))
            .and_then(|_| self.serial.write_all(exception.detail().as_bytes()))
            .and_then(|_| self.serial.write_all(b"\n"))
            .and_then(|_| self.serial.flush());
        if result.is_err() {
            warn!("fault report not written to serial");
        }
    }

    /// Give the peripherals back
    pub fn release(self) -> (D, W, K, C) {
        (self.display, self.serial, self.keys, self.clock)
    }
}
