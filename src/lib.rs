//! heatwatch library.
//!
//! Heat-stress monitoring for a remote temperature/humidity station:
//! heat-index risk scoring, a hysteretic severity state machine, and the
//! monitoring service that ties them to display, data log, plot and
//! email adapters.  Exposed as a library for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod notify;
pub mod risk;
pub mod sensors;
