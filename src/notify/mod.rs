//! Outbound alert delivery.
//!
//! The monitoring loop raises alerts synchronously through an
//! [`AlertPort`]; delivery happens on the mail task.  Nothing here
//! retries: an alert that cannot be queued or sent is logged and lost.

pub mod channels;
pub mod task;

use log::info;

use crate::app::alerts::AlertMessage;
use crate::app::ports::AlertPort;
use crate::error::SinkError;

pub use channels::{QueuedAlerts, ALERT_CHANNEL};
pub use task::RateLimitedMailer;

/// [`AlertPort`] used when email is not configured.  Logs and discards.
#[derive(Debug, Default)]
pub struct LogOnlyAlerts {
    raised: u64,
}

impl LogOnlyAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raised(&self) -> u64 {
        self.raised
    }
}

impl AlertPort for LogOnlyAlerts {
    fn raise(&mut self, alert: AlertMessage) -> Result<(), SinkError> {
        self.raised += 1;
        info!("Email disabled, alert not sent: {}", alert.subject);
        Ok(())
    }
}
