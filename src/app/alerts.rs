//! Alert debounce.
//!
//! An alert fires once per **entry** into Warning, Danger or Critical.
//! Staying in the same state is silent; Recovering and Nominal re-arm the
//! latch without alerting.

use core::fmt::Write as _;

use crate::fsm::SeverityState;

/// Maximum subject length (the longest is "Critical State Detected").
pub const SUBJECT_CAP: usize = 32;

/// Maximum body length.
pub const BODY_CAP: usize = 160;

/// A ready-to-send alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub level: SeverityState,
    pub subject: heapless::String<SUBJECT_CAP>,
    pub body: heapless::String<BODY_CAP>,
}

impl AlertMessage {
    /// Build the alert text for `level`.
    ///
    /// Returns `None` for states that never alert.
    pub fn for_state(level: SeverityState, temperature_c: f64, humidity_pct: f64) -> Option<Self> {
        if !is_alerting(level) {
            return None;
        }
        let name = level.name();
        let lower = name.to_ascii_lowercase();
        let mut subject = heapless::String::new();
        write!(subject, "{name} State Detected").ok()?;
        let mut body = heapless::String::new();
        if write!(
            body,
            "A {lower} state has been detected with readings of {temperature_c:.2} \u{00b0}C and {humidity_pct:.2}% relative humidity",
        )
        .is_err()
        {
            // Readings too wide for the buffer: send the level alone.
            body.clear();
            write!(body, "A {lower} state has been detected").ok()?;
        }
        Some(Self {
            level,
            subject,
            body,
        })
    }
}

/// `true` for the states that warrant an outbound alert.
pub const fn is_alerting(state: SeverityState) -> bool {
    matches!(
        state,
        SeverityState::Warning | SeverityState::Danger | SeverityState::Critical
    )
}

/// Fire-once-per-entry latch.
#[derive(Debug, Default)]
pub struct AlertLatch {
    /// The alerting state we last fired for, if still in it.
    fired_for: Option<SeverityState>,
}

impl AlertLatch {
    pub const fn new() -> Self {
        Self { fired_for: None }
    }

    /// Feed the state after an update.  Returns `true` when an alert
    /// should be sent for `state`.
    pub fn observe(&mut self, state: SeverityState) -> bool {
        if !is_alerting(state) {
            self.fired_for = None;
            return false;
        }
        if self.fired_for == Some(state) {
            return false;
        }
        self.fired_for = Some(state);
        true
    }

    /// The state the latch is currently holding, if any.
    pub fn armed_for(&self) -> Option<SeverityState> {
        self.fired_for
    }
}
