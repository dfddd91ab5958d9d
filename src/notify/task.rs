//! Async mail task.
//!
//! Runs in a dedicated thread using `edge-executor`.  A single future
//! waits on [`ALERT_CHANNEL`](super::channels::ALERT_CHANNEL) and hands
//! each alert to the [`Mailer`] through a `burster` token bucket, so a
//! flapping sensor cannot flood the recipient.
//!
//! ```text
//!  ┌──────────────────────────────────────────────┐
//!  │  alert-mail thread                           │
//!  │  ┌────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor          │  │
//!  │  │  ┌──────────────────────────────────┐  │  │
//!  │  │  │ dispatch: receive → bucket → SMTP│  │  │
//!  │  │  └──────────────────────────────────┘  │  │
//!  │  └────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────┘
//! ```

use core::time::Duration;

use burster::Limiter;
use log::{info, warn};

use crate::app::alerts::AlertMessage;
use crate::app::ports::Mailer;
use crate::error::SinkError;

use super::channels::{AlertChannel, ALERT_CHANNEL};

/// Emails allowed back-to-back before the interval applies.
pub const EMAIL_BURST: u64 = 3;

/// Monotonic clock consulted by the token bucket.
pub type TimeProvider = Box<dyn Fn() -> Duration>;

/// A [`Mailer`] behind a token bucket: one token per interval, burst
/// [`EMAIL_BURST`].  Alerts over the limit are dropped.
pub struct RateLimitedMailer<M> {
    mailer: M,
    bucket: burster::TokenBucket<TimeProvider>,
    sent: u64,
    dropped: u64,
}

impl<M: Mailer> RateLimitedMailer<M> {
    pub fn new(mailer: M, min_interval_secs: u64) -> Self {
        Self::with_time_provider(mailer, min_interval_secs, Box::new(platform_now))
    }

    /// The bucket refills at one token per second of its own clock, so the
    /// supplied clock is slowed down by `min_interval_secs`.
    pub fn with_time_provider(mailer: M, min_interval_secs: u64, now: TimeProvider) -> Self {
        let interval = min_interval_secs.max(1) as f64;
        let scaled: TimeProvider =
            Box::new(move || Duration::from_secs_f64(now().as_secs_f64() / interval));
        Self {
            mailer,
            bucket: burster::TokenBucket::new_with_time_provider(1, EMAIL_BURST, scaled),
            sent: 0,
            dropped: 0,
        }
    }

    pub fn deliver(&mut self, alert: &AlertMessage) -> Result<(), SinkError> {
        if self.bucket.try_consume(1).is_err() {
            self.dropped += 1;
            warn!("Email rate limit hit, dropping '{}'", alert.subject);
            return Err(SinkError::RateLimited);
        }
        match self.mailer.send(alert) {
            Ok(()) => {
                self.sent += 1;
                Ok(())
            }
            Err(e) => {
                self.dropped += 1;
                Err(e)
            }
        }
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

// ── Async loop ───────────────────────────────────────────────

/// Wait for alerts forever.  Wakes when the monitor loop enqueues.
async fn dispatch_loop<M: Mailer>(channel: &'static AlertChannel, mut mailer: RateLimitedMailer<M>) {
    loop {
        let alert = channel.receive().await;
        // Failures are logged by the mailer; delivery is best effort.
        let _ = mailer.deliver(&alert);
    }
}

fn run_dispatch<M: Mailer>(channel: &'static AlertChannel, mailer: RateLimitedMailer<M>) {
    let executor: edge_executor::LocalExecutor<'_, 2> = edge_executor::LocalExecutor::new();
    executor.spawn(dispatch_loop(channel, mailer)).detach();
    info!("Alert mail task started (burst {})", EMAIL_BURST);
    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}

// ── Thread spawn ─────────────────────────────────────────────

/// Spawn the mail task on its own thread, draining [`ALERT_CHANNEL`].
///
/// The thread lives until the process exits.
pub fn spawn<M: Mailer + Send + 'static>(
    mailer: M,
    min_interval_secs: u64,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("alert-mail".to_string())
        .spawn(move || {
            run_dispatch(
                &ALERT_CHANNEL,
                RateLimitedMailer::new(mailer, min_interval_secs),
            )
        })
}

fn platform_now() -> Duration {
    use std::time::Instant;
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    START.get_or_init(Instant::now).elapsed()
}

// ── Tests ────────────────────────────────────────────────────
