//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules of the station monitor:
//! cycle orchestration, alert debounce, and the events it reports.
//! All interaction with the station, disk, display and mail happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a real sensor station.

pub mod alerts;
pub mod events;
pub mod ports;
pub mod service;
