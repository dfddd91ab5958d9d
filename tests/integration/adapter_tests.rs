//! Integration tests wiring the real output adapters to the service.
//!
//! Uses temp files for the data log and plot archive; the LCD and event
//! sink log to the `log` facade (no subscriber installed, so silent).

use std::path::PathBuf;

use embassy_sync::channel::Channel;

use heatwatch::adapters::StationOutputs;
use heatwatch::adapters::data_file::DataFileLog;
use heatwatch::adapters::lcd::{COLOUR_DANGER, ConsoleDisplay};
use heatwatch::adapters::log_sink::LogEventSink;
use heatwatch::adapters::plot::PlotHistory;
use heatwatch::app::alerts::AlertMessage;
use heatwatch::app::ports::Mailer;
use heatwatch::app::service::MonitorService;
use heatwatch::error::SinkError;
use heatwatch::fsm::{SeverityState, SeverityStateMachine};
use heatwatch::notify::channels::AlertChannel;
use heatwatch::notify::{LogOnlyAlerts, QueuedAlerts, RateLimitedMailer};

use crate::mock_station::ScriptedStation;

fn temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("heatwatch-it-{}-{}", tag, std::process::id()))
}

#[test]
fn real_outputs_record_every_evaluated_cycle() {
    let data = temp_file("data.txt");
    let archive = temp_file("plot.json");
    let _ = std::fs::remove_file(&data);

    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::new([
        (Some(33.0), Some(55.0), Some(31.5), None),
        (None, Some(50.0), None, None),
        (Some(35.0), Some(60.0), Some(32.0), Some(30.0)),
    ]);
    let mut out = StationOutputs {
        display: ConsoleDisplay::new(16),
        log: DataFileLog::new(&data),
        plot: PlotHistory::new(20, &archive),
        alerts: LogOnlyAlerts::new(),
    };
    let mut sink = LogEventSink::new();

    svc.start(&mut sink);
    for _ in 0..3 {
        svc.tick(&mut src, &mut out, &mut sink);
    }
    let summary = svc.shutdown(&mut out, &mut sink);
    assert_eq!(summary.sink_failures, 0);

    let text = std::fs::read_to_string(&data).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "skipped cycle is not logged");
    assert!(lines[0].starts_with("33,31.5,,55,2025-07-01 12:00:00"));
    assert!(lines[0].ends_with(",0.594,Warning"));
    assert!(lines[1].ends_with(",0.835,Danger"));

    let frame = out.display.last_frame().unwrap();
    assert_eq!(frame.colour, COLOUR_DANGER);
    assert_eq!(frame.lines[0].as_str(), "System Danger");
    assert_eq!(out.log.lines_written(), 2);
    assert_eq!(out.alerts.raised(), 2);

    let plot: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&archive).unwrap()).unwrap();
    assert_eq!(plot["samples"].as_array().unwrap().len(), 2);

    let _ = std::fs::remove_file(&data);
    let _ = std::fs::remove_file(&archive);
}

// ── Alert queue → rate-limited mailer ────────────────────────

struct Outbox;

impl Mailer for Outbox {
    fn send(&mut self, alert: &AlertMessage) -> Result<(), SinkError> {
        assert!(alert.subject.ends_with("State Detected"));
        Ok(())
    }
}

static QUEUE: AlertChannel = Channel::new();

#[test]
fn queued_alerts_reach_the_mailer() {
    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::climate(&[(33.0, 55.0), (35.0, 60.0), (40.0, 80.0)]);
    let mut out = StationOutputs {
        display: ConsoleDisplay::new(16),
        log: DataFileLog::new(temp_file("queue-data.txt")),
        plot: PlotHistory::new(5, temp_file("queue-plot.json")),
        alerts: QueuedAlerts::new(&QUEUE),
    };
    let mut sink = LogEventSink::new();
    for _ in 0..3 {
        svc.tick(&mut src, &mut out, &mut sink);
    }
    assert_eq!(svc.state(), SeverityState::Critical);

    let frozen = Box::new(|| core::time::Duration::ZERO);
    let mut mailer = RateLimitedMailer::with_time_provider(Outbox, 60, frozen);
    while let Ok(alert) = QUEUE.try_receive() {
        mailer.deliver(&alert).unwrap();
    }
    assert_eq!(mailer.sent(), 3);

    let _ = std::fs::remove_file(temp_file("queue-data.txt"));
}
