//! Per-cell data and the context threaded through every FSM handler.
//!
//! [`Cell`] is the persistent record the registry owns.  [`CellContext`]
//! lives for a single [`advance`](super::CellFsm::advance) call and lends
//! the handlers the cell, the sensor adapter, and the calibration budget.

use serde::Serialize;

use super::CellState;
use crate::app::ports::{CalibrationResult, CellSensorPort};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One physical oxygen cell slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    index: u8,
    pub(crate) state: CellState,
    /// Only meaningful while `state == Calibrating`.
    pub(crate) calibration_attempts: u8,
}

impl Cell {
    /// A freshly powered cell: `Reset`, no attempts.
    pub const fn new(index: u8) -> Self {
        Self {
            index,
            state: CellState::Reset,
            calibration_attempts: 0,
        }
    }

    /// Rebuild a cell from known parts (e.g. a test fixture or a snapshot).
    pub const fn from_parts(index: u8, state: CellState, calibration_attempts: u8) -> Self {
        Self {
            index,
            state,
            calibration_attempts,
        }
    }

    /// Rebuild a cell from an untrusted raw state code.
    /// Unknown codes decode as `Unconnected`.
    pub fn from_raw(index: u8, state_code: u8, calibration_attempts: u8) -> Self {
        Self::from_parts(index, CellState::from_raw(state_code), calibration_attempts)
    }

    pub const fn index(&self) -> u8 {
        self.index
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn calibration_attempts(&self) -> u8 {
        self.calibration_attempts
    }

    /// Return to the power-on state, keeping the index.
    pub(crate) fn reinitialize(&mut self) {
        *self = Self::new(self.index);
    }
}

// ---------------------------------------------------------------------------
// CellContext
// ---------------------------------------------------------------------------

/// Everything a state handler may read or write during one tick.
pub struct CellContext<'a, S> {
    pub cell: &'a mut Cell,
    pub sensor: &'a mut S,
    /// Calibration retries allowed before `CalibrationFailed`.
    pub max_attempts: u8,
}

impl<S: CellSensorPort> CellContext<'_, S> {
    pub fn is_connected(&mut self) -> bool {
        self.sensor.is_connected(self.cell.index)
    }

    pub fn start_calibration(&mut self) {
        self.sensor.start_calibration(self.cell.index);
    }

    pub fn calibration_result(&mut self) -> CalibrationResult {
        self.sensor.calibration_result(self.cell.index)
    }

    pub fn raw_measurement(&mut self) -> u32 {
        self.sensor.raw_measurement(self.cell.index)
    }

    /// Count one more tick spent calibrating and return the new total.
    pub fn bump_attempts(&mut self) -> u8 {
        self.cell.calibration_attempts = self.cell.calibration_attempts.saturating_add(1);
        self.cell.calibration_attempts
    }

    /// True once the attempt counter has gone past the budget.
    pub fn attempts_exhausted(&self) -> bool {
        self.cell.calibration_attempts > self.max_attempts
    }
}
