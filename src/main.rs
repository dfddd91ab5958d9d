//! heatwatch: Main Entry Point
//!
//! Hexagonal architecture: adapters on the outside, the monitoring
//! service in the middle, the polling loop on a local async executor.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HttpStationSource  LogEventSink   JsonConfigFile  SystemClock │
//! │  (SensorSource)     (EventSink)    (ConfigPort)    (ClockPort) │
//! │  ConsoleDisplay     DataFileLog    PlotHistory     QueuedAlerts│
//! │  (DisplayPort)      (RecordLog)    (PlotPort)      (AlertPort) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  risk · SeverityStateMachine · AlertLatch              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  alert-mail thread: ALERT_CHANNEL → token bucket → SMTP        │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use heatwatch::adapters::clock::SystemClock;
use heatwatch::adapters::config_file::JsonConfigFile;
use heatwatch::adapters::data_file::DataFileLog;
use heatwatch::adapters::email::{SmtpCredentials, SmtpMailer};
use heatwatch::adapters::http_station::HttpStationSource;
use heatwatch::adapters::lcd::ConsoleDisplay;
use heatwatch::adapters::log_sink::LogEventSink;
use heatwatch::adapters::plot::PlotHistory;
use heatwatch::adapters::StationOutputs;
use heatwatch::app::alerts::AlertMessage;
use heatwatch::app::ports::{AlertPort, ConfigPort, EventSink, SensorSource};
use heatwatch::app::service::{MonitorService, RunSummary};
use heatwatch::config::StationConfig;
use heatwatch::error::SinkError;
use heatwatch::fsm::SeverityStateMachine;
use heatwatch::notify::{self, LogOnlyAlerts, QueuedAlerts};

// ── Alert routing ─────────────────────────────────────────────
//
// Email is optional; both routes satisfy the same port so the rest of
// the wiring does not care which one is live.

enum AlertRoute {
    Email(QueuedAlerts),
    LogOnly(LogOnlyAlerts),
}

impl AlertPort for AlertRoute {
    fn raise(&mut self, alert: AlertMessage) -> Result<(), SinkError> {
        match self {
            Self::Email(q) => q.raise(alert),
            Self::LogOnly(l) => l.raise(alert),
        }
    }
}

fn alert_route(config: &StationConfig) -> Result<AlertRoute> {
    let Some(settings) = &config.email else {
        info!("Email alerts disabled (no `email` section in config)");
        return Ok(AlertRoute::LogOnly(LogOnlyAlerts::new()));
    };
    let mailer = SmtpMailer::new(settings, SmtpCredentials::from_env())
        .context("configuring SMTP mailer")?;
    notify::task::spawn(mailer, settings.min_interval_secs)
        .context("spawning alert-mail thread")?;
    info!(
        "Email alerts to {} via {}:{}",
        settings.to_address, settings.smtp_host, settings.smtp_port
    );
    Ok(AlertRoute::Email(QueuedAlerts::global()))
}

// ── Polling loop ──────────────────────────────────────────────

type Outputs = StationOutputs<ConsoleDisplay, DataFileLog, PlotHistory, AlertRoute>;

async fn monitor_loop(
    mut service: MonitorService,
    mut source: impl SensorSource,
    mut outputs: Outputs,
    mut sink: impl EventSink,
    interval: Duration,
    max_cycles: Option<u64>,
) -> RunSummary {
    service.start(&mut sink);
    loop {
        service.tick(&mut source, &mut outputs, &mut sink);
        if max_cycles.is_some_and(|max| service.cycle_count() >= max) {
            info!("Cycle limit reached ({})", service.cycle_count());
            break;
        }
        async_io_mini::Timer::after(interval).await;
    }
    service.shutdown(&mut outputs, &mut sink)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Environment + logging ──────────────────────────────
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heatwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("╔══════════════════════════════════════╗");
    info!("║  heatwatch v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let config_file = JsonConfigFile::resolve(std::env::args().nth(1));
    let config = config_file
        .load()
        .with_context(|| format!("loading config from {}", config_file.path().display()))?;
    info!(
        "Station {} every {} ms{}",
        config.station_url,
        config.poll_interval_ms,
        match config.max_cycles {
            Some(n) => format!(", {} cycles", n),
            None => String::new(),
        }
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let source =
        HttpStationSource::new(&config, SystemClock::new()).context("building HTTP client")?;
    let outputs = StationOutputs {
        display: ConsoleDisplay::new(config.lcd_columns),
        log: DataFileLog::new(&config.data_file),
        plot: PlotHistory::new(config.plot_window, &config.plot_archive),
        alerts: alert_route(&config)?,
    };
    let sink = LogEventSink::new();

    // ── 4. Core ───────────────────────────────────────────────
    let service = MonitorService::new(SeverityStateMachine::new());

    // ── 5. Run ────────────────────────────────────────────────
    let executor: edge_executor::LocalExecutor<'_, 1> = edge_executor::LocalExecutor::new();
    let summary = futures_lite::future::block_on(executor.run(monitor_loop(
        service,
        source,
        outputs,
        sink,
        Duration::from_millis(config.poll_interval_ms),
        config.max_cycles,
    )));

    info!(
        "Run summary: cycles={} skipped={} transitions={} sink_failures={}",
        summary.cycles, summary.skipped, summary.transitions, summary.sink_failures
    );
    if summary.sink_failures > 0 {
        warn!("{} sink operations failed during the run", summary.sink_failures);
    }
    Ok(())
}
