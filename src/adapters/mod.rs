//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements    | Connects to                 |
//! |----------------|---------------|-----------------------------|
//! | `clock`        | ClockPort     | Host wall clock             |
//! | `config_file`  | ConfigPort    | JSON file on disk           |
//! | `data_file`    | RecordLog     | Append-only CSV data log    |
//! | `email`        | Mailer        | SMTP relay (STARTTLS)       |
//! | `http_station` | SensorSource  | Station web server (HTTP)   |
//! | `lcd`          | DisplayPort   | Console stand-in for LCD    |
//! | `log_sink`     | EventSink     | `log` facade                |
//! | `plot`         | PlotPort      | In-memory ring + JSON dump  |

pub mod clock;
pub mod config_file;
pub mod data_file;
pub mod email;
pub mod http_station;
pub mod lcd;
pub mod log_sink;
pub mod plot;

use crate::app::alerts::AlertMessage;
use crate::app::events::EvaluatedRecord;
use crate::app::ports::{AlertPort, DisplayPort, PlotPort, RecordLog};
use crate::error::SinkError;
use crate::sensors::Reading;

/// Bundles the four output adapters so the service can borrow them as one
/// `&mut (impl DisplayPort + RecordLog + PlotPort + AlertPort)`.
pub struct StationOutputs<D, L, P, A> {
    pub display: D,
    pub log: L,
    pub plot: P,
    pub alerts: A,
}

impl<D: DisplayPort, L, P, A> DisplayPort for StationOutputs<D, L, P, A> {
    fn show(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError> {
        self.display.show(record)
    }
}

impl<D, L: RecordLog, P, A> RecordLog for StationOutputs<D, L, P, A> {
    fn append(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError> {
        self.log.append(record)
    }
}

impl<D, L, P: PlotPort, A> PlotPort for StationOutputs<D, L, P, A> {
    fn push_sample(&mut self, reading: &Reading) {
        self.plot.push_sample(reading);
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.plot.flush()
    }
}

impl<D, L, P, A: AlertPort> AlertPort for StationOutputs<D, L, P, A> {
    fn raise(&mut self, alert: AlertMessage) -> Result<(), SinkError> {
        self.alerts.raise(alert)
    }
}
