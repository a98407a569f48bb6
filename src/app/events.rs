//! Outbound application events.
//!
//! The [`OxygenMonitor`](super::service::OxygenMonitor) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use heapless::Vec;
use serde::Serialize;

use crate::config::MAX_CELLS;
use crate::fsm::CellState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEvent {
    /// The monitor initialised its registry.
    Started { cells: usize },

    /// A cell's FSM moved between states.
    StateChanged { cell: u8, from: CellState, to: CellState },

    /// Calibration reported FAILED but the cell still has budget left.
    CalibrationRetry { cell: u8, attempt: u8 },

    /// A cell exhausted its calibration budget.
    CalibrationFailed { cell: u8, attempts: u8 },

    /// Periodic status snapshot of every cell.
    Report(StatusReport),
}

/// One cell's line in a [`StatusReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellStatus {
    pub index: u8,
    pub state: CellState,
    /// Measurement or negative error sentinel, as served to callers.
    pub measurement: i32,
    pub calibration_attempts: u8,
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub sweep: u64,
    pub cells: Vec<CellStatus, MAX_CELLS>,
}
