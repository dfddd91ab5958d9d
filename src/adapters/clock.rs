//! System clock adapter.
//!
//! Implements [`ClockPort`] with the host's local wall clock.  Tests use
//! their own stepping clocks instead.

use chrono::{DateTime, Local};

use crate::app::ports::ClockPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
