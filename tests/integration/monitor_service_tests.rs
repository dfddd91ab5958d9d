//! Integration tests for the source → MonitorService → sinks pipeline.
//!
//! These run on the host and drive the service with a scripted station,
//! checking what reaches the display, data log, plot and alert port.

use heatwatch::app::events::MonitorEvent;
use heatwatch::app::service::{CycleOutcome, MonitorService};
use heatwatch::fsm::{SeverityState, SeverityStateMachine};

use crate::mock_station::{EventLog, RecordingOutputs, ScriptedStation};

use SeverityState::*;

// Climate pairs with known risk scores.
const COOL: (f64, f64) = (-10.0, 50.0); // 0.0
const MILD: (f64, f64) = (26.0, 50.0); // 0.2
const WARM: (f64, f64) = (30.0, 50.0); // 0.368
const HOT: (f64, f64) = (33.0, 55.0); // 0.594
const VERY_HOT: (f64, f64) = (35.0, 60.0); // 0.835
const EXTREME: (f64, f64) = (40.0, 80.0); // 1.0

fn run(script: &[(f64, f64)]) -> (MonitorService, RecordingOutputs, EventLog) {
    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::climate(script);
    let mut out = RecordingOutputs::new();
    let mut ev = EventLog::new();
    svc.start(&mut ev);
    for _ in 0..script.len() {
        svc.tick(&mut src, &mut out, &mut ev);
    }
    (svc, out, ev)
}

// ── Escalation and recovery ──────────────────────────────────

#[test]
fn full_escalation_and_recovery() {
    let (svc, out, ev) = run(&[HOT, VERY_HOT, EXTREME, HOT, MILD]);

    assert_eq!(
        ev.transitions(),
        [
            (Nominal, Warning),
            (Warning, Danger),
            (Danger, Critical),
            (Critical, Recovering),
            (Recovering, Nominal),
        ]
    );
    assert_eq!(out.frames, [Warning, Danger, Critical, Recovering, Nominal]);
    assert_eq!(
        out.alert_subjects(),
        [
            "Warning State Detected",
            "Danger State Detected",
            "Critical State Detected"
        ]
    );
    assert_eq!(svc.state_machine().transition_count(), 5);
}

#[test]
fn warning_holds_until_score_drops_below_exit_threshold() {
    let (svc, _out, ev) = run(&[HOT, WARM, MILD, COOL]);
    // 0.368 and 0.2 both sit inside the Warning band; only 0.0 exits.
    assert_eq!(ev.transitions(), [(Nominal, Warning), (Warning, Nominal)]);
    assert_eq!(svc.state(), Nominal);
}

#[test]
fn danger_holds_at_mid_score() {
    let (svc, out, _ev) = run(&[HOT, VERY_HOT, HOT, HOT]);
    // 0.594 is above Danger's 0.5 exit threshold.
    assert_eq!(svc.state(), Danger);
    assert_eq!(out.alerts.len(), 2);
}

#[test]
fn recovering_can_fall_back_into_danger() {
    let (svc, out, ev) = run(&[HOT, VERY_HOT, EXTREME, HOT, VERY_HOT]);
    assert_eq!(ev.transitions().last(), Some(&(Recovering, Danger)));
    assert_eq!(svc.state(), Danger);
    // Danger was re-entered after Recovering re-armed the latch.
    assert_eq!(
        out.alert_subjects().iter().filter(|s| **s == "Danger State Detected").count(),
        2
    );
}

#[test]
fn repeated_alerting_state_alerts_once() {
    let (_svc, out, ev) = run(&[HOT, HOT, HOT, HOT]);
    assert_eq!(out.alerts.len(), 1);
    assert_eq!(
        ev.count(|e| matches!(e, MonitorEvent::AlertQueued(Warning))),
        1
    );
}

// ── Missing data ─────────────────────────────────────────────

#[test]
fn missing_climate_skips_without_touching_state() {
    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::new([
        (Some(33.0), Some(55.0), Some(30.1), None),
        (None, Some(55.0), Some(30.2), Some(29.0)),
        (Some(f64::NAN), Some(55.0), None, None),
        (Some(33.0), Some(55.0), None, None),
    ]);
    let mut out = RecordingOutputs::new();
    let mut ev = EventLog::new();

    let outcomes: Vec<CycleOutcome> = (0..4)
        .map(|_| svc.tick(&mut src, &mut out, &mut ev))
        .collect();

    assert!(!outcomes[0].is_skipped());
    assert!(outcomes[1].is_skipped());
    assert!(outcomes[2].is_skipped());
    assert!(!outcomes[3].is_skipped());
    assert_eq!(svc.skipped_count(), 2);
    assert_eq!(svc.state(), Warning);
    // Display keeps its last frame: no frames for skipped cycles.
    assert_eq!(out.frames.len(), 2);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.samples.len(), 2);
    assert_eq!(
        ev.count(|e| matches!(e, MonitorEvent::SensorUnavailable { .. })),
        2
    );
    assert_eq!(ev.count(|e| matches!(e, MonitorEvent::Reading(_))), 4);
}

#[test]
fn aux_probes_are_recorded_but_do_not_gate() {
    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::new([(Some(26.0), Some(50.0), Some(24.0), None)]);
    let mut out = RecordingOutputs::new();
    let mut ev = EventLog::new();

    let outcome = svc.tick(&mut src, &mut out, &mut ev);
    assert!(!outcome.is_skipped());
    assert_eq!(out.records[0].reading.aux_temp_1, Some(24.0));
    assert_eq!(out.records[0].reading.aux_temp_2, None);
}

// ── Sink failures ────────────────────────────────────────────

#[test]
fn sink_failures_do_not_stop_the_cycle() {
    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::climate(&[HOT, VERY_HOT]);
    let mut out = RecordingOutputs {
        fail_display: true,
        alerts_full: true,
        ..RecordingOutputs::new()
    };
    let mut ev = EventLog::new();

    svc.tick(&mut src, &mut out, &mut ev);
    svc.tick(&mut src, &mut out, &mut ev);

    assert_eq!(svc.state(), Danger);
    assert_eq!(out.records.len(), 2, "data log still written");
    // Two display failures + two dropped alerts.
    assert_eq!(svc.sink_failures(), 4);
    assert_eq!(
        ev.count(|e| matches!(e, MonitorEvent::SinkFailed { sink: "alerts", .. })),
        2
    );
}

#[test]
fn shutdown_flushes_plot_and_reports() {
    let mut svc = MonitorService::new(SeverityStateMachine::new());
    let mut src = ScriptedStation::new([
        (Some(33.0), Some(55.0), None, None),
        (None, None, None, None),
    ]);
    let mut out = RecordingOutputs::new();
    let mut ev = EventLog::new();

    svc.tick(&mut src, &mut out, &mut ev);
    svc.tick(&mut src, &mut out, &mut ev);
    let summary = svc.shutdown(&mut out, &mut ev);

    assert_eq!(out.flushed, 1);
    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.transitions, 1);
    assert_eq!(summary.final_state, Some(Warning));
}
