//! Severity finite state machine.
//!
//! Classifies a stream of risk scores into one of five severity levels,
//! with separate entry and exit thresholds so a score hovering around a
//! single boundary cannot make the level flap.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Per-state update handlers (see [`states`])              │
//! │  ┌────────────┬───────────────────────────────────────┐  │
//! │  │ Nominal    │ fn(score) -> Option<SeverityState>    │  │
//! │  │ Warning    │ fn(score) -> Option<SeverityState>    │  │
//! │  │ Danger     │ fn(score) -> Option<SeverityState>    │  │
//! │  │ Critical   │ fn(score) -> Option<SeverityState>    │  │
//! │  │ Recovering │ fn(score) -> Option<SeverityState>    │  │
//! │  └────────────┴───────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call to [`SeverityStateMachine::update`] runs the handler for the
//! **current** state.  If it returns `Some(next)` and `next` differs from
//! the current state, the machine records the transition time and logs
//! the change.  Nothing else is mutable.
//!
//! The machine is single-writer: the monitoring loop owns it and drives
//! it through `&mut self`.  There is no internal locking.

pub mod states;

use core::fmt;

use chrono::{DateTime, Local};
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Severity classification of current conditions.
///
/// Compared by tag only.  There is no `Ord`: how severe a
/// level is lives in the transition table, not in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityState {
    Nominal,
    Warning,
    Danger,
    Critical,
    Recovering,
}

impl SeverityState {
    /// Every state, for exhaustive tests and tables.
    pub const ALL: [Self; 5] = [
        Self::Nominal,
        Self::Warning,
        Self::Danger,
        Self::Critical,
        Self::Recovering,
    ];

    /// Stable external name (`"Nominal"`, `"Warning"`, …).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nominal => "Nominal",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Critical => "Critical",
            Self::Recovering => "Recovering",
        }
    }
}

impl fmt::Display for SeverityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Transition record
// ---------------------------------------------------------------------------

/// One observed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SeverityState,
    pub to: SeverityState,
    pub at: DateTime<Local>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The severity state machine.
#[derive(Debug, Clone)]
pub struct SeverityStateMachine {
    current: SeverityState,
    /// When `current` was entered (process start for the initial state).
    last_transition: DateTime<Local>,
    /// Number of real transitions since construction.
    transitions: u64,
}

impl Default for SeverityStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SeverityStateMachine {
    /// A fresh machine in `Nominal`, stamped with the current time.
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    /// A fresh machine in `Nominal` with an explicit start time.
    pub fn starting_at(at: DateTime<Local>) -> Self {
        info!("FSM starting in state: {}", SeverityState::Nominal);
        Self {
            current: SeverityState::Nominal,
            last_transition: at,
            transitions: 0,
        }
    }

    /// Feed one risk score; returns the (possibly new) current state.
    pub fn update(&mut self, risk_score: f64) -> SeverityState {
        self.update_at(risk_score, Local::now())
    }

    /// [`update`](Self::update) with an explicit clock reading, so the
    /// recorded transition time can follow the reading's timestamp.
    pub fn update_at(&mut self, risk_score: f64, at: DateTime<Local>) -> SeverityState {
        if let Some(next) = states::next_state(self.current, risk_score) {
            self.transition(next, at);
        }
        self.current
    }

    /// Move to `new_state`.
    ///
    /// No-op when `new_state` is already current: the timestamp is left
    /// alone and nothing is logged.  Returns the transition when one
    /// actually happened.
    pub fn transition(&mut self, new_state: SeverityState, at: DateTime<Local>) -> Option<Transition> {
        if new_state == self.current {
            return None;
        }

        let from = self.current;
        info!(
            "[{}] FSM transition: {} -> {}",
            at.format("%H:%M:%S"),
            from,
            new_state
        );

        self.current = new_state;
        self.last_transition = at;
        self.transitions += 1;

        Some(Transition {
            from,
            to: new_state,
            at,
        })
    }

    /// The current state.
    pub fn current_state(&self) -> SeverityState {
        self.current
    }

    /// When the current state was entered.
    pub fn last_transition_time(&self) -> DateTime<Local> {
        self.last_transition
    }

    /// How many real transitions have happened.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }
}
