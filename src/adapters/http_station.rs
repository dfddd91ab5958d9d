//! HTTP sensor-station adapter.
//!
//! Implements [`SensorSource`] against the station's plain-text web
//! server.  Each of the four endpoints is fetched independently with a
//! blocking `reqwest` client; a failure on one channel leaves only that
//! field empty.
//!
//! | Endpoint    | Sensor      | Unit |
//! |-------------|-------------|------|
//! | `/temp`     | DHT22       | °F   |
//! | `/humidity` | DHT22       | %RH  |
//! | `/ds1`      | DS18B20 #1  | °C   |
//! | `/ds2`      | DS18B20 #2  | °C   |

use std::time::Duration;

use log::{debug, warn};

use crate::app::ports::{ClockPort, SensorSource};
use crate::config::StationConfig;
use crate::error::SensorError;
use crate::sensors::{dht22, ds18b20, Reading, SensorChannel};

/// Blocking HTTP client for the station.
pub struct HttpStationSource<C: ClockPort> {
    client: reqwest::blocking::Client,
    endpoints: [(SensorChannel, String); 4],
    clock: C,
}

impl<C: ClockPort> HttpStationSource<C> {
    /// Build a client with the configured per-request timeout.
    pub fn new(config: &StationConfig, clock: C) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()?;
        let endpoints = [
            (
                SensorChannel::Temperature,
                config.endpoint(&config.temperature_path),
            ),
            (SensorChannel::Humidity, config.endpoint(&config.humidity_path)),
            (SensorChannel::Aux1, config.endpoint(&config.aux1_path)),
            (SensorChannel::Aux2, config.endpoint(&config.aux2_path)),
        ];
        Ok(Self {
            client,
            endpoints,
            clock,
        })
    }

    /// URL polled for `channel`.
    pub fn url(&self, channel: SensorChannel) -> &str {
        self.endpoints
            .iter()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, url)| url.as_str())
            .unwrap_or_default()
    }

    fn fetch(&self, url: &str) -> Result<String, SensorError> {
        let response = self.client.get(url).send().map_err(|e| {
            debug!("GET {} failed: {}", url, e);
            SensorError::Unreachable
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SensorError::BadStatus(status.as_u16()));
        }
        response.text().map_err(|_| SensorError::Unparsable)
    }

    fn read_channel(&self, channel: SensorChannel, url: &str) -> Result<f64, SensorError> {
        let body = self.fetch(url)?;
        match channel {
            SensorChannel::Temperature => dht22::parse_temperature_f(&body),
            SensorChannel::Humidity => dht22::parse_humidity(&body),
            SensorChannel::Aux1 | SensorChannel::Aux2 => ds18b20::parse_probe(&body),
        }
    }
}

impl<C: ClockPort> SensorSource for HttpStationSource<C> {
    fn poll(&mut self) -> Reading {
        let mut reading = Reading::empty(self.clock.now());
        for (channel, url) in &self.endpoints {
            match self.read_channel(*channel, url) {
                Ok(value) => reading.set(*channel, Some(value)),
                Err(e) => warn!("Error reading {} ({}): {}", channel, url, e),
            }
        }
        reading
    }
}
