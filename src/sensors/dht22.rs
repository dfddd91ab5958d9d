//! DHT22 air temperature / humidity channel parsing.
//!
//! The station firmware reports the DHT22 temperature in Fahrenheit and
//! the humidity as a bare percentage.  When the sensor is read too often
//! it answers `nan`, which is rejected here.

use crate::error::SensorError;
use crate::risk::fahrenheit_to_celsius;

use super::parse_number;

/// Parse a `/temp` body (°F) into °C.
pub fn parse_temperature_f(body: &str) -> Result<f64, SensorError> {
    parse_number(body).map(fahrenheit_to_celsius)
}

/// Parse a `/humidity` body (%).
///
/// Values outside 0–100 are passed through: the risk calculator does not
/// clamp humidity either.
pub fn parse_humidity(body: &str) -> Result<f64, SensorError> {
    parse_number(body)
}
