//! Live plot history.
//!
//! Keeps the most recent `window` temperature/humidity samples in a
//! fixed-capacity ring for the live view and writes the retained series to
//! a JSON archive on shutdown.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use heapless::Deque;
use log::{info, warn};
use serde::Serialize;

use crate::app::ports::PlotPort;
use crate::config::MAX_PLOT_WINDOW;
use crate::error::SinkError;
use crate::sensors::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotSample {
    pub timestamp: DateTime<Local>,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

/// Archive layout.
#[derive(Serialize)]
struct PlotArchive<'a> {
    window: usize,
    samples: Vec<&'a PlotSample>,
}

pub struct PlotHistory {
    samples: Deque<PlotSample, MAX_PLOT_WINDOW>,
    window: usize,
    archive: PathBuf,
}

impl PlotHistory {
    /// `window` is clamped to `1..=MAX_PLOT_WINDOW`.
    pub fn new(window: usize, archive: impl Into<PathBuf>) -> Self {
        Self {
            samples: Deque::new(),
            window: window.clamp(1, MAX_PLOT_WINDOW),
            archive: archive.into(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &PlotSample> {
        self.samples.iter()
    }

    /// Latest sample, if any.
    pub fn latest(&self) -> Option<&PlotSample> {
        self.samples.back()
    }

    /// Serialise the retained series.
    pub fn to_json(&self) -> Result<Vec<u8>, SinkError> {
        let archive = PlotArchive {
            window: self.window,
            samples: self.samples.iter().collect(),
        };
        serde_json::to_vec_pretty(&archive).map_err(|_| SinkError::Encode)
    }
}

impl PlotPort for PlotHistory {
    fn push_sample(&mut self, reading: &Reading) {
        let Some((temperature_c, humidity_pct)) = reading.climate() else {
            return;
        };
        while self.samples.len() >= self.window {
            self.samples.pop_front();
        }
        // Room was made above.
        let _ = self.samples.push_back(PlotSample {
            timestamp: reading.timestamp,
            temperature_c,
            humidity_pct,
        });
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let json = self.to_json()?;
        std::fs::write(&self.archive, json).map_err(|e| {
            warn!("Plot archive {} write failed: {}", self.archive.display(), e);
            SinkError::Io
        })?;
        info!(
            "Plot archive written: {} ({} samples)",
            self.archive.display(),
            self.samples.len()
        );
        Ok(())
    }
}
