//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no sensor
//! station, SMTP server or display required.

mod adapter_tests;
mod mock_station;
mod monitor_service_tests;
