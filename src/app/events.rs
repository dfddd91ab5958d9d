//! Outbound monitor events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the console, forward to a
//! dashboard, etc.

use chrono::{DateTime, Local};

use crate::error::SinkError;
use crate::fsm::SeverityState;
use crate::risk::RiskResult;
use crate::sensors::{Reading, SensorChannel};

/// Structured events emitted by the monitoring core.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// The service has started (carries initial state).
    Started(SeverityState),

    /// A raw reading was polled, whether or not it is usable.
    Reading(Reading),

    /// Temperature or humidity was missing; the cycle was skipped.
    SensorUnavailable {
        missing: heapless::Vec<SensorChannel, 4>,
        at: DateTime<Local>,
    },

    /// The severity FSM transitioned between states.
    StateChanged {
        from: SeverityState,
        to: SeverityState,
        at: DateTime<Local>,
    },

    /// An alert was handed to the alert port.
    AlertQueued(SeverityState),

    /// A sink rejected its input.  The cycle carried on.
    SinkFailed {
        sink: &'static str,
        error: SinkError,
    },
}

/// Everything the sinks need about one evaluated cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatedRecord {
    pub reading: Reading,
    pub risk: RiskResult,
    pub state: SeverityState,
}

impl EvaluatedRecord {
    /// Air temperature used for the risk computation (°C).
    ///
    /// Records are only built for readings that passed the climate gate,
    /// so this is always the polled value; NaN is unreachable.
    pub fn temperature_c(&self) -> f64 {
        self.reading.temperature_c.unwrap_or(f64::NAN)
    }

    /// Relative humidity used for the risk computation (%).
    pub fn humidity_pct(&self) -> f64 {
        self.reading.humidity_pct.unwrap_or(f64::NAN)
    }
}
