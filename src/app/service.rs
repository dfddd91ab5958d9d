//! Monitoring service: the hexagonal core.
//!
//! [`MonitorService`] owns the severity FSM and the alert latch.  It
//! exposes a clean, I/O-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  SensorSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │      MonitorService      │
//!  Display/Log/  ◀──│  risk · FSM · AlertLatch │
//!  Plot/Alert       └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::error::SinkError;
use crate::fsm::{SeverityState, SeverityStateMachine};
use crate::risk::{self, RiskResult};
use crate::sensors::Reading;

use super::alerts::{AlertLatch, AlertMessage};
use super::events::{EvaluatedRecord, MonitorEvent};
use super::ports::{AlertPort, DisplayPort, EventSink, PlotPort, RecordLog, SensorSource};

// ───────────────────────────────────────────────────────────────
// Results
// ───────────────────────────────────────────────────────────────

/// What one call to [`MonitorService::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// The core ran on this reading.
    Evaluated {
        reading: Reading,
        risk: RiskResult,
        state: SeverityState,
        changed: bool,
    },
    /// Temperature or humidity was missing; the core did not run.
    Skipped { reading: Reading },
}

impl CycleOutcome {
    pub fn reading(&self) -> &Reading {
        match self {
            Self::Evaluated { reading, .. } | Self::Skipped { reading } => reading,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub cycles: u64,
    pub skipped: u64,
    pub transitions: u64,
    pub sink_failures: u64,
    pub final_state: Option<SeverityState>,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitoring service orchestrates all domain logic.
pub struct MonitorService {
    fsm: SeverityStateMachine,
    latch: AlertLatch,
    cycles: u64,
    skipped: u64,
    sink_failures: u64,
}

impl MonitorService {
    /// Construct the service around an already-created state machine.
    pub fn new(fsm: SeverityStateMachine) -> Self {
        Self {
            fsm,
            latch: AlertLatch::new(),
            cycles: 0,
            skipped: 0,
            sink_failures: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&MonitorEvent::Started(self.fsm.current_state()));
        info!("MonitorService started in {}", self.fsm.current_state());
    }

    /// Flush buffered artefacts and report the run counters.
    pub fn shutdown(&mut self, plot: &mut impl PlotPort, sink: &mut impl EventSink) -> RunSummary {
        if let Err(e) = plot.flush() {
            self.sink_failed("plot", e, sink);
        }
        let summary = self.summary();
        info!(
            "MonitorService stopped: cycles={} skipped={} transitions={} sink_failures={} state={}",
            summary.cycles,
            summary.skipped,
            summary.transitions,
            summary.sink_failures,
            self.fsm.current_state(),
        );
        summary
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one monitoring cycle: poll → risk → FSM → sinks.
    ///
    /// The `out` parameter satisfies every output port at once; this
    /// avoids juggling four mutable borrows while keeping each port
    /// boundary explicit.
    pub fn tick(
        &mut self,
        source: &mut impl SensorSource,
        out: &mut (impl DisplayPort + RecordLog + PlotPort + AlertPort),
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycles += 1;

        // 1. Poll
        let reading = source.poll();
        sink.emit(&MonitorEvent::Reading(reading));

        // 2. Gate on temperature + humidity
        let Some((temp_c, humidity)) = reading.climate() else {
            self.skipped += 1;
            let missing = reading.missing_channels();
            warn!("Cycle {} skipped: climate reading unavailable", self.cycles);
            sink.emit(&MonitorEvent::SensorUnavailable {
                missing,
                at: reading.timestamp,
            });
            return CycleOutcome::Skipped { reading };
        };
        out.push_sample(&reading);

        // 3. Core: risk score + state update
        let prev = self.fsm.current_state();
        let risk = risk::compute(temp_c, humidity);
        let state = self.fsm.update_at(risk.risk_score, reading.timestamp);
        let changed = state != prev;
        debug!(
            "HI={:.2}C risk={:.3} state={}",
            risk.heat_index_c, risk.risk_score, state
        );
        if changed {
            sink.emit(&MonitorEvent::StateChanged {
                from: prev,
                to: state,
                at: self.fsm.last_transition_time(),
            });
        }

        // 4. Sinks
        let record = EvaluatedRecord {
            reading,
            risk,
            state,
        };
        if let Err(e) = out.append(&record) {
            self.sink_failed("data_log", e, sink);
        }
        if let Err(e) = out.show(&record) {
            self.sink_failed("display", e, sink);
        }

        // 5. Alert debounce
        if self.latch.observe(state) {
            if let Some(alert) = AlertMessage::for_state(state, temp_c, humidity) {
                match out.raise(alert) {
                    Ok(()) => sink.emit(&MonitorEvent::AlertQueued(state)),
                    Err(e) => self.sink_failed("alerts", e, sink),
                }
            }
        }

        CycleOutcome::Evaluated {
            reading,
            risk,
            state,
            changed,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current severity state.
    pub fn state(&self) -> SeverityState {
        self.fsm.current_state()
    }

    /// Read-only view of the state machine.
    pub fn state_machine(&self) -> &SeverityStateMachine {
        &self.fsm
    }

    /// Cycles run since startup, skipped ones included.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped
    }

    pub fn sink_failures(&self) -> u64 {
        self.sink_failures
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.cycles,
            skipped: self.skipped,
            transitions: self.fsm.transition_count(),
            sink_failures: self.sink_failures,
            final_state: Some(self.fsm.current_state()),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn sink_failed(&mut self, name: &'static str, error: SinkError, sink: &mut impl EventSink) {
        self.sink_failures += 1;
        warn!("Sink '{}' failed: {}", name, error);
        sink.emit(&MonitorEvent::SinkFailed { sink: name, error });
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
