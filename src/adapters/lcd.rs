//! 16×2 RGB character LCD frame and a console stand-in.
//!
//! The backlight colour follows the severity state; the text shows the
//! state and the reading it was derived from:
//!
//! ```text
//! ┌────────────────┐
//! │System Warning  │
//! │33.00C, 55.00%  │
//! └────────────────┘
//! ```

use core::fmt::Write as _;

use log::info;

use crate::app::events::EvaluatedRecord;
use crate::app::ports::DisplayPort;
use crate::config::MAX_LCD_COLUMNS;
use crate::error::SinkError;
use crate::fsm::SeverityState;

/// RGB backlight colour.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_NOMINAL: Rgb = (0, 255, 0); // Green
pub const COLOUR_WARNING: Rgb = (255, 255, 50); // Yellow
pub const COLOUR_DANGER: Rgb = (255, 0, 0); // Red
pub const COLOUR_CRITICAL: Rgb = (153, 0, 153); // Purple
pub const COLOUR_RECOVERING: Rgb = (100, 180, 255); // Light blue

pub type LcdLine = heapless::String<MAX_LCD_COLUMNS>;

pub const fn colour_for(state: SeverityState) -> Rgb {
    match state {
        SeverityState::Nominal => COLOUR_NOMINAL,
        SeverityState::Warning => COLOUR_WARNING,
        SeverityState::Danger => COLOUR_DANGER,
        SeverityState::Critical => COLOUR_CRITICAL,
        SeverityState::Recovering => COLOUR_RECOVERING,
    }
}

/// One rendered screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdFrame {
    pub colour: Rgb,
    pub lines: [LcdLine; 2],
}

impl LcdFrame {
    /// Render `record` for a display `columns` characters wide.
    pub fn render(record: &EvaluatedRecord, columns: usize) -> Self {
        let columns = columns.min(MAX_LCD_COLUMNS);
        let mut top = String::new();
        let mut bottom = String::new();
        let _ = write!(top, "System {}", record.state);
        let _ = write!(
            bottom,
            "{:.2}C, {:.2}%",
            record.temperature_c(),
            record.humidity_pct()
        );
        Self {
            colour: colour_for(record.state),
            lines: [fit(&top, columns), fit(&bottom, columns)],
        }
    }
}

/// Truncate to `columns` characters.
fn fit(text: &str, columns: usize) -> LcdLine {
    let mut line = LcdLine::new();
    for ch in text.chars().take(columns) {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}

/// Logs each frame instead of driving a physical panel.
pub struct ConsoleDisplay {
    columns: usize,
    last: Option<LcdFrame>,
}

impl ConsoleDisplay {
    pub fn new(columns: u8) -> Self {
        Self {
            columns: usize::from(columns),
            last: None,
        }
    }

    /// The frame currently on screen.
    pub fn last_frame(&self) -> Option<&LcdFrame> {
        self.last.as_ref()
    }
}

impl DisplayPort for ConsoleDisplay {
    fn show(&mut self, record: &EvaluatedRecord) -> Result<(), SinkError> {
        let frame = LcdFrame::render(record, self.columns);
        let (r, g, b) = frame.colour;
        info!(
            "LCD | rgb=({},{},{}) | {} | {}",
            r, g, b, frame.lines[0], frame.lines[1]
        );
        self.last = Some(frame);
        Ok(())
    }
}
