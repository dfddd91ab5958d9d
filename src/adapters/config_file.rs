//! JSON config file adapter.
//!
//! Implements [`ConfigPort`] on a single JSON file.  Fields missing from
//! the file take their defaults; a missing file means all defaults.
//! Every load and save passes [`validate_config`].

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::{validate_config, StationConfig};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "HEATWATCH_CONFIG";

/// Used when neither the CLI nor the environment names a file.
pub const DEFAULT_CONFIG_PATH: &str = "heatwatch.json";

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the config path: first CLI argument, then
    /// `HEATWATCH_CONFIG`, then [`DEFAULT_CONFIG_PATH`].
    pub fn resolve(cli_arg: Option<String>) -> Self {
        let path = cli_arg
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<StationConfig, ConfigError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", self.path.display());
                return Ok(StationConfig::default());
            }
            Err(e) => {
                warn!("Config read {} failed: {}", self.path.display(), e);
                return Err(ConfigError::IoError);
            }
        };
        let cfg: StationConfig = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Config {} is not valid JSON: {}", self.path.display(), e);
            ConfigError::Corrupted
        })?;
        validate_config(&cfg)?;
        info!("Config loaded from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &StationConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let json = serde_json::to_vec_pretty(config).map_err(|_| ConfigError::Corrupted)?;
        std::fs::write(&self.path, json).map_err(|e| {
            warn!("Config write {} failed: {}", self.path.display(), e);
            ConfigError::IoError
        })?;
        info!("Config saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("heatwatch-cfg-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let file = JsonConfigFile::new(temp_path("missing"));
        assert_eq!(file.load().unwrap(), StationConfig::default());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip");
        let file = JsonConfigFile::new(&path);
        let cfg = StationConfig {
            poll_interval_ms: 2000,
            max_cycles: Some(10),
            ..StationConfig::default()
        };
        file.save(&cfg).unwrap();
        assert_eq!(file.load().unwrap(), cfg);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_rejects_invalid() {
        let path = temp_path("invalid");
        let file = JsonConfigFile::new(&path);
        let cfg = StationConfig {
            poll_interval_ms: 5,
            ..StationConfig::default()
        };
        assert!(matches!(file.save(&cfg), Err(ConfigError::ValidationFailed(_))));
        assert!(!path.exists());
    }

    #[test]
    fn corrupted_and_invalid_files() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"{ not json").unwrap();
        assert_eq!(JsonConfigFile::new(&path).load(), Err(ConfigError::Corrupted));

        std::fs::write(&path, br#"{ "plot_window": 0 }"#).unwrap();
        assert!(matches!(
            JsonConfigFile::new(&path).load(),
            Err(ConfigError::ValidationFailed(_))
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn cli_argument_wins() {
        let file = JsonConfigFile::resolve(Some("custom.json".to_string()));
        assert_eq!(file.path(), Path::new("custom.json"));
    }
}
