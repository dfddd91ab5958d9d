//! Port traits: the boundary between the monitoring logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (station HTTP client, LCD, data file, plot, mailer,
//! event log) implement these traits.  The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the scoring and state logic never touches I/O directly.

use chrono::{DateTime, Local};

use crate::config::StationConfig;
use crate::error::SinkError;
use crate::sensors::Reading;

use super::alerts::AlertMessage;
use super::events::EvaluatedRecord;

// ───────────────────────────────────────────────────────────────
// Sensor source (driven adapter: station → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
///
/// Implementations never fail as a whole; each channel that could not be
/// read is simply `None` in the returned [`Reading`].  Retrying is the
/// implementation's business.
pub trait SensorSource {
    fn poll(&mut self) -> Reading;
}

/// Wall-clock source used to timestamp readings.
pub trait ClockPort {
    fn now(&self) -> DateTime<Local>;
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapters: domain → display / disk / mail)
// ───────────────────────────────────────────────────────────────

/// Local status display (LCD or console stand-in).
pub trait DisplayPort {
    /// Show the latest evaluated record.
    fn show(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError>;
}

/// Append-only log of evaluated cycles.
pub trait RecordLog {
    fn append(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError>;
}

/// Live plot of temperature and humidity.
pub trait PlotPort {
    /// Add one sample.  Only called when both values are present.
    fn push_sample(&mut self, reading: &Reading);

    /// Persist whatever the plot has buffered (called on shutdown).
    fn flush(&mut self) -> Result<(), SinkError>;
}

/// Outbound alerts.  Fire-and-forget: an `Ok` means queued, not delivered.
pub trait AlertPort {
    fn raise(&mut self, alert: AlertMessage) -> Result<(), SinkError>;
}

/// Synchronous mail transport used by the alert task.
pub trait Mailer {
    fn send(&mut self, alert: &AlertMessage) -> Result<(), SinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ config file)
// ───────────────────────────────────────────────────────────────

/// Loads and persists monitor configuration.
///
/// Implementations MUST run
/// [`validate_config`](crate::config::validate_config) on load and before
/// persisting; invalid values are rejected, never silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Returns [`StationConfig::default()`] if no
    /// stored config exists.
    fn load(&self) -> Result<StationConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &StationConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
