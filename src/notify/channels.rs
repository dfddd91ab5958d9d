//! Alert hand-off channel.
//!
//! Uses an `embassy-sync` bounded channel to bridge the synchronous
//! monitoring loop with the async mail task.  The loop never waits: a
//! full channel drops the alert.
//!
//! ```text
//! ┌──────────────┐ AlertMessage ┌──────────────┐
//! │ Monitor loop │─────────────▶│  Mail task   │
//! │  (sync)      │  try_send    │  (async)     │
//! └──────────────┘              └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::alerts::AlertMessage;
use crate::app::ports::AlertPort;
use crate::error::SinkError;

/// Alerts waiting for the mail task.
pub const ALERT_DEPTH: usize = 4;

pub type AlertChannel = Channel<CriticalSectionRawMutex, AlertMessage, ALERT_DEPTH>;

/// Monitor loop → mail task.
pub static ALERT_CHANNEL: AlertChannel = Channel::new();

/// [`AlertPort`] that enqueues onto an [`AlertChannel`].
pub struct QueuedAlerts {
    channel: &'static AlertChannel,
}

impl QueuedAlerts {
    pub fn new(channel: &'static AlertChannel) -> Self {
        Self { channel }
    }

    /// Port on the process-wide [`ALERT_CHANNEL`].
    pub fn global() -> Self {
        Self::new(&ALERT_CHANNEL)
    }
}

impl AlertPort for QueuedAlerts {
    fn raise(&mut self, alert: AlertMessage) -> Result<(), SinkError> {
        self.channel.try_send(alert).map_err(|e| {
            let embassy_sync::channel::TrySendError::Full(dropped) = e;
            warn!("Alert channel full, dropping '{}'", dropped.subject);
            SinkError::QueueFull
        })
    }
}
