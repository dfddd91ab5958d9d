//! Error types for the station monitor.
//!
//! Sensor and sink errors are `Copy` so they can be passed through events
//! and counters without allocation.  Configuration errors live with the
//! [`ConfigPort`](crate::app::ports::ConfigPort) trait.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Why a single sensor channel produced no value this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The station could not be reached (connect, timeout, DNS).
    Unreachable,
    /// The station answered with a non-success HTTP status.
    BadStatus(u16),
    /// The body was not a number.
    Unparsable,
    /// The value parsed but is NaN/infinite or a disconnect sentinel.
    OutOfRange,
    /// The station reports the probe as absent.
    NotPresent,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "station unreachable"),
            Self::BadStatus(code) => write!(f, "HTTP status {code}"),
            Self::Unparsable => write!(f, "body is not a number"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::NotPresent => write!(f, "probe not present"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Appending to or flushing a file failed.
    Io,
    /// Serialising an artefact failed.
    Encode,
    /// The alert queue is full; the alert was dropped.
    QueueFull,
    /// The mail transport rejected or failed to send a message.
    Mail,
    /// Outbound email is being rate limited.
    RateLimited,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Encode => write!(f, "encode failed"),
            Self::QueueFull => write!(f, "alert queue full"),
            Self::Mail => write!(f, "mail transport failed"),
            Self::RateLimited => write!(f, "rate limited"),
        }
    }
}

impl std::error::Error for SinkError {}
