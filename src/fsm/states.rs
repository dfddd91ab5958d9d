//! Per-state update handlers and the dispatch over them.
//!
//! Each handler looks only at the risk score and returns `Some(next)` to
//! request a transition or `None` to stay.  Conditions are checked in the
//! listed order; the first match wins.
//!
//! ```text
//!              >0.4            >0.7            >0.9
//!   NOMINAL ─────────▶ WARNING ─────▶ DANGER ─────────▶ CRITICAL
//!     ▲  ▲     <0.2       │          ▲    │                │
//!     │  └────────────────┘     >0.7 │    │ <0.5           │ <0.7
//!     │                              │    ▼                │
//!     └──────────<0.3──────────── RECOVERING ◀─────────────┘
//! ```
//!
//! Entry and exit thresholds differ on purpose (e.g. Warning is entered
//! above 0.4 but only left for Nominal below 0.2).  Danger falls to
//! Recovering rather than Warning, and Recovering can climb back to Danger
//! but never straight to Critical.

use super::SeverityState;

/// Run the update handler for `current`.
pub fn next_state(current: SeverityState, risk_score: f64) -> Option<SeverityState> {
    match current {
        SeverityState::Nominal => nominal_update(risk_score),
        SeverityState::Warning => warning_update(risk_score),
        SeverityState::Danger => danger_update(risk_score),
        SeverityState::Critical => critical_update(risk_score),
        SeverityState::Recovering => recovering_update(risk_score),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  NOMINAL
// ═══════════════════════════════════════════════════════════════════════════

fn nominal_update(score: f64) -> Option<SeverityState> {
    if score > 0.4 {
        return Some(SeverityState::Warning);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  WARNING
// ═══════════════════════════════════════════════════════════════════════════

fn warning_update(score: f64) -> Option<SeverityState> {
    if score > 0.7 {
        return Some(SeverityState::Danger);
    }
    if score < 0.2 {
        return Some(SeverityState::Nominal);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DANGER
// ═══════════════════════════════════════════════════════════════════════════

fn danger_update(score: f64) -> Option<SeverityState> {
    if score > 0.9 {
        return Some(SeverityState::Critical);
    }
    // Falling out of Danger goes through Recovering even at a score that
    // would read as Warning from Nominal.
    if score < 0.5 {
        return Some(SeverityState::Recovering);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CRITICAL
// ═══════════════════════════════════════════════════════════════════════════

fn critical_update(score: f64) -> Option<SeverityState> {
    if score < 0.7 {
        return Some(SeverityState::Recovering);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RECOVERING
// ═══════════════════════════════════════════════════════════════════════════

fn recovering_update(score: f64) -> Option<SeverityState> {
    if score < 0.3 {
        return Some(SeverityState::Nominal);
    }
    if score > 0.7 {
        return Some(SeverityState::Danger);
    }
    None
}
