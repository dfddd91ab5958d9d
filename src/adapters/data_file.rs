//! Append-only data log adapter.
//!
//! One CSV line per evaluated cycle:
//!
//! ```text
//! temp,aux1,aux2,humidity,timestamp,heat_index,risk,state
//! ```
//!
//! Absent auxiliary probes are written as empty fields.  The file is
//! opened in append mode for every line so an external reader can tail it
//! and a crash loses at most the current line.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use log::warn;

use crate::app::events::EvaluatedRecord;
use crate::app::ports::RecordLog;
use crate::error::SinkError;

/// `chrono` format for the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub struct DataFileLog {
    path: PathBuf,
    lines_written: u64,
}

impl DataFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

/// Render one record as a CSV line (with trailing newline).
pub fn format_line(record: &EvaluatedRecord) -> String {
    fn opt(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }

    let r = &record.reading;
    let mut line = String::with_capacity(96);
    let _ = writeln!(
        line,
        "{},{},{},{},{},{},{},{}",
        opt(r.temperature_c),
        opt(r.aux_temp_1),
        opt(r.aux_temp_2),
        opt(r.humidity_pct),
        r.timestamp.format(TIMESTAMP_FORMAT),
        record.risk.heat_index_c,
        record.risk.risk_score,
        record.state,
    );
    line
}

impl RecordLog for DataFileLog {
    fn append(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError> {
        let line = format_line(record);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                warn!("Data log open {} failed: {}", self.path.display(), e);
                SinkError::Io
            })?;
        file.write_all(line.as_bytes()).map_err(|e| {
            warn!("Data log write failed: {}", e);
            SinkError::Io
        })?;
        self.lines_written += 1;
        Ok(())
    }
}
