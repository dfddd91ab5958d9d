//! DS18B20 probe channel parsing.
//!
//! Probes report °C.  A probe that is not on the bus is reported either as
//! the text `DS18B20 #2 not found!` or as the Dallas library's
//! disconnected sentinel of -127 °C.

use crate::error::SensorError;

use super::parse_number;

/// Temperature reported by the Dallas library for a disconnected probe.
pub const DISCONNECTED_C: f64 = -127.0;

/// Parse a `/ds1` or `/ds2` body (°C).
pub fn parse_probe(body: &str) -> Result<f64, SensorError> {
    if body.to_ascii_lowercase().contains("not found") {
        return Err(SensorError::NotPresent);
    }
    let value = parse_number(body)?;
    if (value - DISCONNECTED_C).abs() < f64::EPSILON {
        return Err(SensorError::NotPresent);
    }
    Ok(value)
}
