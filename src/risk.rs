//! Heat-index risk scoring.
//!
//! Converts an air temperature and relative humidity into the U.S.
//! National Weather Service heat index, then normalises it into a bounded
//! risk score that drives the severity FSM.
//!
//! ```text
//!  temp °C ──▶ °F ──┬─ T < 80 °F ──▶ HI = T
//!                   └─ T ≥ 80 °F ──▶ Rothfusz ± correction
//!                                        │
//!              risk = clamp((HI °C - 20) / 30, 0, 1) ◀──┘
//! ```
//!
//! Everything here is pure: no state, no I/O.

/// Heat index below which no risk is reported (°C).
pub const HEAT_INDEX_FLOOR_C: f64 = 20.0;

/// Heat index at which risk saturates (°C).
pub const HEAT_INDEX_CEILING_C: f64 = 50.0;

/// Below this apparent temperature the regression is not used (°F).
const REGRESSION_THRESHOLD_F: f64 = 80.0;

/// Output of one risk evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskResult {
    /// Heat index in °C, rounded to 2 decimal places.
    pub heat_index_c: f64,
    /// Normalised risk in `[0.0, 1.0]`, rounded to 3 decimal places.
    pub risk_score: f64,
}

/// Compute the heat index and risk score for one reading.
///
/// # Preconditions
///
/// Both inputs must be finite.  NaN or missing sensor values have to be
/// filtered out by the caller before this is invoked; the result for
/// non-finite input is unspecified.  Humidity is expected in `[0, 100]`
/// but is neither validated nor clamped.
pub fn compute(temperature_c: f64, humidity_pct: f64) -> RiskResult {
    let hi_c = heat_index_c(temperature_c, humidity_pct);
    let score = normalise(hi_c);
    RiskResult {
        heat_index_c: round_to(hi_c, 2),
        risk_score: round_to(score, 3),
    }
}

/// Unrounded heat index in °C.
pub fn heat_index_c(temperature_c: f64, humidity_pct: f64) -> f64 {
    let temp_f = celsius_to_fahrenheit(temperature_c);
    fahrenheit_to_celsius(heat_index_f(temp_f, humidity_pct))
}

/// Heat index in °F for an air temperature in °F.
///
/// Below 80 °F the air temperature is returned unchanged.  Otherwise the
/// Rothfusz regression is applied with at most one of the two NWS
/// adjustments.
pub fn heat_index_f(temp_f: f64, humidity_pct: f64) -> f64 {
    if temp_f < REGRESSION_THRESHOLD_F {
        return temp_f;
    }

    let hi = rothfusz(temp_f, humidity_pct);
    let t = temp_f;
    let r = humidity_pct;

    if r < 13.0 && (80.0..=112.0).contains(&t) {
        // Dry air: the regression overshoots.
        let adj = ((13.0 - r) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
        hi - adj
    } else if r > 85.0 && (80.0..=87.0).contains(&t) {
        // Humid air at the low end of the regression range.
        let adj = ((r - 85.0) / 10.0) * ((87.0 - t) / 5.0);
        hi + adj
    } else {
        hi
    }
}

/// The bare Rothfusz regression, no adjustments (°F in, °F out).
pub fn rothfusz(t: f64, r: f64) -> f64 {
    let t2 = t * t;
    let r2 = r * r;
    -42.379 + 2.049_015_23 * t + 10.143_331_27 * r
        - 0.224_755_41 * t * r
        - 0.006_837_83 * t2
        - 0.054_817_17 * r2
        + 0.001_228_74 * t2 * r
        + 0.000_852_82 * t * r2
        - 0.000_001_99 * t2 * r2
}

/// Map a heat index (°C) onto `[0.0, 1.0]`.
pub fn normalise(heat_index_c: f64) -> f64 {
    let span = HEAT_INDEX_CEILING_C - HEAT_INDEX_FLOOR_C;
    ((heat_index_c - HEAT_INDEX_FLOOR_C) / span).clamp(0.0, 1.0)
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
