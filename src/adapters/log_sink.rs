//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured cell events through the
//! `log` facade (UART on the device, stderr on a host).  Status reports
//! are written as one JSON line so they can be scraped off the console.

use log::{info, warn};

use crate::app::events::{CellEvent, StatusReport};
use crate::app::ports::EventSink;

/// Adapter that logs every [`CellEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// Render a report as a single JSON line.
pub fn report_json(report: &StatusReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &CellEvent) {
        match event {
            CellEvent::Started { cells } => {
                info!("START | cells={}", cells);
            }
            CellEvent::StateChanged { cell, from, to } => {
                info!("STATE | cell={} | {} -> {}", cell, from, to);
            }
            CellEvent::CalibrationRetry { cell, attempt } => {
                info!("CALIB | cell={} | retry attempt={}", cell, attempt);
            }
            CellEvent::CalibrationFailed { cell, attempts } => {
                warn!("CALIB | cell={} | failed after {} attempts", cell, attempts);
            }
            CellEvent::Report(report) => match report_json(report) {
                Ok(json) => info!("REPORT | {}", json),
                Err(e) => warn!("REPORT | sweep={} | serialisation failed: {}", report.sweep, e),
            },
        }
    }
}
