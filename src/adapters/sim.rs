//! Simulated oxygen cell bank.
//!
//! Stands in for the cell hardware on host builds and in tests.  Every
//! response can be injected per cell, and every calibration request and
//! measurement read is counted so tests can assert on the exact queries
//! the FSM made.
//!
//! Out-of-range indices behave like an empty slot: not connected,
//! calibration failed, reading zero.

use log::debug;

use crate::app::ports::{CalibrationResult, CellSensorPort};
use crate::config::MAX_CELLS;

/// Reading reported by a healthy simulated cell.
pub const SIM_DEFAULT_READING: u32 = 123_456;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimCell {
    connected: bool,
    calibration: CalibrationResult,
    raw: u32,
    calibration_starts: u32,
    result_reads: u32,
    measurement_reads: u32,
}

impl SimCell {
    const HEALTHY: Self = Self {
        connected: true,
        calibration: CalibrationResult::Ok,
        raw: SIM_DEFAULT_READING,
        calibration_starts: 0,
        result_reads: 0,
        measurement_reads: 0,
    };
}

/// Injectable bank of `N` simulated cells.
#[derive(Debug, Clone)]
pub struct SimCellBank<const N: usize = MAX_CELLS> {
    slots: [SimCell; N],
}

impl<const N: usize> Default for SimCellBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SimCellBank<N> {
    /// Every cell connected, calibrating OK, reading [`SIM_DEFAULT_READING`].
    pub fn new() -> Self {
        Self {
            slots: [SimCell::HEALTHY; N],
        }
    }

    /// Builder: mark `cell` as absent and failing calibration.
    #[must_use]
    pub fn with_faulty_cell(mut self, cell: u8) -> Self {
        self.set_connected(cell, false);
        self.set_calibration_result(cell, CalibrationResult::Failed);
        self
    }

    pub fn set_connected(&mut self, cell: u8, connected: bool) {
        if let Some(slot) = self.slots.get_mut(cell as usize) {
            slot.connected = connected;
        }
    }

    pub fn set_calibration_result(&mut self, cell: u8, result: CalibrationResult) {
        if let Some(slot) = self.slots.get_mut(cell as usize) {
            slot.calibration = result;
        }
    }

    pub fn set_raw_measurement(&mut self, cell: u8, raw: u32) {
        if let Some(slot) = self.slots.get_mut(cell as usize) {
            slot.raw = raw;
        }
    }

    /// Number of `start_calibration` requests received by `cell`.
    pub fn calibration_starts(&self, cell: u8) -> u32 {
        self.slots
            .get(cell as usize)
            .map_or(0, |s| s.calibration_starts)
    }

    /// Number of `calibration_result` polls received by `cell`.
    pub fn result_reads(&self, cell: u8) -> u32 {
        self.slots.get(cell as usize).map_or(0, |s| s.result_reads)
    }

    /// Number of `raw_measurement` reads received by `cell`.
    pub fn measurement_reads(&self, cell: u8) -> u32 {
        self.slots
            .get(cell as usize)
            .map_or(0, |s| s.measurement_reads)
    }
}

impl<const N: usize> CellSensorPort for SimCellBank<N> {
    fn is_connected(&mut self, cell: u8) -> bool {
        self.slots.get(cell as usize).is_some_and(|s| s.connected)
    }

    fn start_calibration(&mut self, cell: u8) {
        if let Some(slot) = self.slots.get_mut(cell as usize) {
            slot.calibration_starts = slot.calibration_starts.saturating_add(1);
            debug!("Sim cell {}: calibration requested", cell);
        }
    }

    fn calibration_result(&mut self, cell: u8) -> CalibrationResult {
        match self.slots.get_mut(cell as usize) {
            Some(slot) => {
                slot.result_reads = slot.result_reads.saturating_add(1);
                slot.calibration
            }
            None => CalibrationResult::Failed,
        }
    }

    fn raw_measurement(&mut self, cell: u8) -> u32 {
        match self.slots.get_mut(cell as usize) {
            Some(slot) => {
                slot.measurement_reads = slot.measurement_reads.saturating_add(1);
                slot.raw
            }
            None => 0,
        }
    }
}
