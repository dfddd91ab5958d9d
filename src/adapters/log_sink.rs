//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured monitor events to the
//! `log` facade (rendered by `tracing-subscriber` in the binary).
//! A dashboard or MQTT adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;
use crate::sensors::SensorChannel;

/// Adapter that logs every [`MonitorEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.2}", x),
        None => "--".to_string(),
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Reading(r) => {
                info!(
                    "READING | T={}\u{00b0}C | RH={}% | ds1={}\u{00b0}C | ds2={}\u{00b0}C | at={}",
                    fmt_opt(r.temperature_c),
                    fmt_opt(r.humidity_pct),
                    fmt_opt(r.aux_temp_1),
                    fmt_opt(r.aux_temp_2),
                    r.timestamp.format("%H:%M:%S"),
                );
            }
            MonitorEvent::SensorUnavailable { missing, at } => {
                let names: Vec<&str> = missing.iter().map(|c: &SensorChannel| c.name()).collect();
                warn!(
                    "SENSOR | unavailable: {} | at={}",
                    names.join(","),
                    at.format("%H:%M:%S")
                );
            }
            MonitorEvent::StateChanged { from, to, at } => {
                info!("STATE | {} -> {} | at={}", from, to, at.format("%H:%M:%S"));
            }
            MonitorEvent::AlertQueued(state) => {
                info!("ALERT | queued for {}", state);
            }
            MonitorEvent::SinkFailed { sink, error } => {
                warn!("SINK | {} failed: {}", sink, error);
            }
            MonitorEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
        }
    }
}
