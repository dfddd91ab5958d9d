//! Station monitor configuration.
//!
//! All tunable parameters for the monitor.  Loaded from a JSON file via
//! [`ConfigPort`](crate::app::ports::ConfigPort); secrets (SMTP
//! credentials) are never stored here and come from the environment.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Largest plot window the fixed-capacity history can hold.
pub const MAX_PLOT_WINDOW: usize = 64;

/// Widest character LCD supported by the frame buffer.
pub const MAX_LCD_COLUMNS: usize = 16;

/// Core monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    // --- Station ---
    /// Base URL of the sensor station, e.g. `http://192.168.0.7`.
    pub station_url: String,
    /// Path of the DHT22 temperature endpoint (°F).
    pub temperature_path: String,
    /// Path of the DHT22 humidity endpoint (%).
    pub humidity_path: String,
    /// Path of the first DS18B20 probe endpoint (°C).
    pub aux1_path: String,
    /// Path of the second DS18B20 probe endpoint (°C).
    pub aux2_path: String,
    /// Per-request HTTP timeout (milliseconds).
    pub http_timeout_ms: u64,

    // --- Timing ---
    /// Poll interval (milliseconds).
    pub poll_interval_ms: u64,
    /// Stop after this many cycles.  `None` runs forever.
    pub max_cycles: Option<u64>,

    // --- Outputs ---
    /// Append-only data log.
    pub data_file: String,
    /// Number of recent samples kept for the live plot.
    pub plot_window: usize,
    /// Where the plot series is written on shutdown.
    pub plot_archive: String,
    /// LCD width in characters.
    pub lcd_columns: u8,

    // --- Alerts ---
    /// Email settings.  `None` disables email alerts.
    pub email: Option<EmailSettings>,
}

/// Non-secret SMTP settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// SMTP relay host (STARTTLS).
    pub smtp_host: String,
    /// SMTP port.
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Alert recipient.
    pub to_address: String,
    /// Minimum spacing between two emails (seconds).
    pub min_interval_secs: u64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            // Station
            station_url: "http://192.168.0.7".to_string(),
            temperature_path: "/temp".to_string(),
            humidity_path: "/humidity".to_string(),
            aux1_path: "/ds1".to_string(),
            aux2_path: "/ds2".to_string(),
            http_timeout_ms: 800,

            // Timing
            poll_interval_ms: 1000, // 1 Hz
            max_cycles: None,

            // Outputs
            data_file: "DATAFILE.txt".to_string(),
            plot_window: 20,
            plot_archive: "plot.json".to_string(),
            lcd_columns: 16,

            // Alerts
            email: None,
        }
    }
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            from_address: String::new(),
            to_address: String::new(),
            min_interval_secs: 60,
        }
    }
}

impl StationConfig {
    /// Full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.station_url.trim_end_matches('/'), path)
    }
}

/// Range-check every field.  Called on load and before save.
pub fn validate_config(cfg: &StationConfig) -> Result<(), ConfigError> {
    // The station serves plain HTTP and the client is built without TLS.
    if !cfg.station_url.starts_with("http://") {
        return Err(ConfigError::ValidationFailed("station_url must start with http://"));
    }
    for path in [
        &cfg.temperature_path,
        &cfg.humidity_path,
        &cfg.aux1_path,
        &cfg.aux2_path,
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::ValidationFailed("endpoint paths must start with '/'"));
        }
    }
    if !(100..=60_000).contains(&cfg.poll_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "poll_interval_ms must be 100–60000",
        ));
    }
    if cfg.max_cycles == Some(0) {
        return Err(ConfigError::ValidationFailed("max_cycles must be > 0 when set"));
    }
    if cfg.http_timeout_ms == 0 || cfg.http_timeout_ms > cfg.poll_interval_ms * 4 {
        return Err(ConfigError::ValidationFailed(
            "http_timeout_ms must be 1–4x poll_interval_ms",
        ));
    }
    if !(1..=MAX_PLOT_WINDOW).contains(&cfg.plot_window) {
        return Err(ConfigError::ValidationFailed("plot_window must be 1–64"));
    }
    if !(8..=MAX_LCD_COLUMNS).contains(&usize::from(cfg.lcd_columns)) {
        return Err(ConfigError::ValidationFailed("lcd_columns must be 8–16"));
    }
    if cfg.data_file.is_empty() {
        return Err(ConfigError::ValidationFailed("data_file must not be empty"));
    }
    if cfg.plot_archive.is_empty() {
        return Err(ConfigError::ValidationFailed("plot_archive must not be empty"));
    }
    if let Some(email) = &cfg.email {
        if email.smtp_host.is_empty() {
            return Err(ConfigError::ValidationFailed("email.smtp_host must not be empty"));
        }
        if !email.from_address.contains('@') || !email.to_address.contains('@') {
            return Err(ConfigError::ValidationFailed(
                "email.from_address and email.to_address must be addresses",
            ));
        }
        if email.min_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "email.min_interval_secs must be > 0",
            ));
        }
    }
    Ok(())
}
