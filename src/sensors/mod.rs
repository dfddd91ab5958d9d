//! Sensor data model and the per-channel parsers.
//!
//! The remote station exposes four channels.  Each is read independently
//! and may fail on its own, so a [`Reading`] carries one `Option` per
//! channel.  Only the DHT22 pair (air temperature + humidity) feeds the
//! risk calculator; the DS18B20 probes are informational.

pub mod dht22;
pub mod ds18b20;

use core::fmt;

use chrono::{DateTime, Local};

/// One of the station's four measurement channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    /// DHT22 air temperature.
    Temperature,
    /// DHT22 relative humidity.
    Humidity,
    /// First DS18B20 probe.
    Aux1,
    /// Second DS18B20 probe.
    Aux2,
}

impl SensorChannel {
    pub const ALL: [Self; 4] = [Self::Temperature, Self::Humidity, Self::Aux1, Self::Aux2];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Aux1 => "ds18b20#1",
            Self::Aux2 => "ds18b20#2",
        }
    }
}

impl fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point-in-time sample from every channel.  `None` = read failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Air temperature (°C).
    pub temperature_c: Option<f64>,
    /// Relative humidity (%).
    pub humidity_pct: Option<f64>,
    /// First auxiliary probe (°C).
    pub aux_temp_1: Option<f64>,
    /// Second auxiliary probe (°C).
    pub aux_temp_2: Option<f64>,
    /// When the sample was taken.
    pub timestamp: DateTime<Local>,
}

impl Reading {
    /// A reading with every channel absent.
    pub fn empty(timestamp: DateTime<Local>) -> Self {
        Self {
            temperature_c: None,
            humidity_pct: None,
            aux_temp_1: None,
            aux_temp_2: None,
            timestamp,
        }
    }

    /// The (temperature, humidity) pair when both are present and finite.
    ///
    /// This is the gate in front of the risk calculator: `None` means the
    /// cycle must be skipped.
    pub fn climate(&self) -> Option<(f64, f64)> {
        match (self.temperature_c, self.humidity_pct) {
            (Some(t), Some(h)) if t.is_finite() && h.is_finite() => Some((t, h)),
            _ => None,
        }
    }

    /// Channels that produced no value.
    pub fn missing_channels(&self) -> heapless::Vec<SensorChannel, 4> {
        let mut out = heapless::Vec::new();
        for channel in SensorChannel::ALL {
            if self.value(channel).is_none() {
                // Capacity equals the channel count.
                let _ = out.push(channel);
            }
        }
        out
    }

    pub fn value(&self, channel: SensorChannel) -> Option<f64> {
        match channel {
            SensorChannel::Temperature => self.temperature_c,
            SensorChannel::Humidity => self.humidity_pct,
            SensorChannel::Aux1 => self.aux_temp_1,
            SensorChannel::Aux2 => self.aux_temp_2,
        }
    }

    pub fn set(&mut self, channel: SensorChannel, value: Option<f64>) {
        match channel {
            SensorChannel::Temperature => self.temperature_c = value,
            SensorChannel::Humidity => self.humidity_pct = value,
            SensorChannel::Aux1 => self.aux_temp_1 = value,
            SensorChannel::Aux2 => self.aux_temp_2 = value,
        }
    }
}

/// Parse a plain-text numeric body.  Rejects non-finite values.
pub(crate) fn parse_number(body: &str) -> Result<f64, crate::error::SensorError> {
    let value: f64 = body
        .trim()
        .parse()
        .map_err(|_| crate::error::SensorError::Unparsable)?;
    if !value.is_finite() {
        return Err(crate::error::SensorError::OutOfRange);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SensorError;

    #[test]
    fn climate_requires_both_fields() {
        let mut r = Reading::empty(Local::now());
        assert!(r.climate().is_none());
        r.temperature_c = Some(30.0);
        assert!(r.climate().is_none());
        r.humidity_pct = Some(55.0);
        assert_eq!(r.climate(), Some((30.0, 55.0)));
    }

    #[test]
    fn climate_rejects_nan() {
        let mut r = Reading::empty(Local::now());
        r.temperature_c = Some(f64::NAN);
        r.humidity_pct = Some(40.0);
        assert!(r.climate().is_none());
    }

    #[test]
    fn aux_channels_do_not_gate_climate() {
        let mut r = Reading::empty(Local::now());
        r.temperature_c = Some(21.0);
        r.humidity_pct = Some(40.0);
        assert!(r.climate().is_some());
        assert_eq!(
            r.missing_channels().as_slice(),
            &[SensorChannel::Aux1, SensorChannel::Aux2]
        );
    }

    #[test]
    fn set_and_value_agree() {
        let mut r = Reading::empty(Local::now());
        for (i, ch) in SensorChannel::ALL.into_iter().enumerate() {
            r.set(ch, Some(i as f64));
        }
        for (i, ch) in SensorChannel::ALL.into_iter().enumerate() {
            assert_eq!(r.value(ch), Some(i as f64));
        }
        assert!(r.missing_channels().is_empty());
    }

    #[test]
    fn parse_number_trims_and_rejects() {
        assert_eq!(parse_number(" 71.60\r\n"), Ok(71.6));
        assert_eq!(parse_number("nan"), Err(SensorError::OutOfRange));
        assert_eq!(parse_number("inf"), Err(SensorError::OutOfRange));
        assert_eq!(parse_number("hot"), Err(SensorError::Unparsable));
        assert_eq!(parse_number(""), Err(SensorError::Unparsable));
    }
}
