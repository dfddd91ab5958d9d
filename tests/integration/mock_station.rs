//! Mock station and recording sinks for integration tests.
//!
//! The scripted source replays a fixed list of readings one second apart;
//! the recording outputs keep every call so tests can assert on the full
//! history without touching disk, SMTP or a display.

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeDelta, TimeZone};

use heatwatch::app::alerts::AlertMessage;
use heatwatch::app::events::{EvaluatedRecord, MonitorEvent};
use heatwatch::app::ports::{
    AlertPort, ClockPort, DisplayPort, EventSink, PlotPort, RecordLog, SensorSource,
};
use heatwatch::error::SinkError;
use heatwatch::fsm::SeverityState;
use heatwatch::sensors::Reading;

// ── Stepping clock ────────────────────────────────────────────

pub struct StepClock {
    now: std::cell::Cell<DateTime<Local>>,
}

#[allow(dead_code)]
impl StepClock {
    pub fn new() -> Self {
        let start = Local.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        Self {
            now: std::cell::Cell::new(start),
        }
    }
}

impl ClockPort for StepClock {
    fn now(&self) -> DateTime<Local> {
        let t = self.now.get();
        self.now.set(t + TimeDelta::seconds(1));
        t
    }
}

// ── Scripted station ──────────────────────────────────────────

/// One scripted poll: (temperature °C, humidity %, ds1, ds2).
pub type Sample = (Option<f64>, Option<f64>, Option<f64>, Option<f64>);

pub struct ScriptedStation {
    script: VecDeque<Sample>,
    clock: StepClock,
    pub polls: usize,
}

#[allow(dead_code)]
impl ScriptedStation {
    pub fn new(script: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            script: script.into_iter().collect(),
            clock: StepClock::new(),
            polls: 0,
        }
    }

    /// Script where every reading has both climate values and no probes.
    pub fn climate(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(t, h)| (Some(t), Some(h), None, None)))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SensorSource for ScriptedStation {
    fn poll(&mut self) -> Reading {
        self.polls += 1;
        let mut r = Reading::empty(self.clock.now());
        if let Some((t, h, a1, a2)) = self.script.pop_front() {
            r.temperature_c = t;
            r.humidity_pct = h;
            r.aux_temp_1 = a1;
            r.aux_temp_2 = a2;
        }
        r
    }
}

// ── Recording outputs ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingOutputs {
    pub frames: Vec<SeverityState>,
    pub records: Vec<EvaluatedRecord>,
    pub samples: Vec<Reading>,
    pub alerts: Vec<AlertMessage>,
    pub flushed: usize,
    pub fail_display: bool,
    pub alerts_full: bool,
}

#[allow(dead_code)]
impl RecordingOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert_subjects(&self) -> Vec<&str> {
        self.alerts.iter().map(|a| a.subject.as_str()).collect()
    }
}

impl DisplayPort for RecordingOutputs {
    fn show(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError> {
        if self.fail_display {
            return Err(SinkError::Io);
        }
        self.frames.push(record.state);
        Ok(())
    }
}

impl RecordLog for RecordingOutputs {
    fn append(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError> {
        self.records.push(*record);
        Ok(())
    }
}

impl PlotPort for RecordingOutputs {
    fn push_sample(&mut self, reading: &Reading) {
        self.samples.push(*reading);
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushed += 1;
        Ok(())
    }
}

impl AlertPort for RecordingOutputs {
    fn raise(&mut self, alert: AlertMessage) -> Result<(), SinkError> {
        if self.alerts_full {
            return Err(SinkError::QueueFull);
        }
        self.alerts.push(alert);
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<MonitorEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<(SeverityState, SeverityState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MonitorEvent::StateChanged { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&MonitorEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}
