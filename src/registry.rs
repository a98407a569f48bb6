//! Fixed-capacity cell registry.
//!
//! One [`Cell`] per physical slot, stored inline in an array sized by a
//! const generic.  Every lookup is bounds-checked: an out-of-range index
//! reads as `Unconnected` and yields [`MeasureError::InvalidIndex`],
//! never a panic.

use crate::app::ports::CellSensorPort;
use crate::config::MAX_CELLS;
use crate::error::MeasureError;
use crate::fsm::context::Cell;
use crate::fsm::{CellFsm, CellState};

/// Ordered collection of `N` cells indexed `0..N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRegistry<const N: usize = MAX_CELLS> {
    cells: [Cell; N],
}

impl<const N: usize> Default for CellRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CellRegistry<N> {
    /// Allocate `N` cells in `Reset`, with `index = i`.
    pub fn new() -> Self {
        const { assert!(N <= u8::MAX as usize + 1, "cell indices must fit in u8") };
        Self {
            cells: core::array::from_fn(|i| Cell::new(i as u8)),
        }
    }

    /// Put every cell back into its power-on state.
    pub fn initialize(&mut self) {
        for cell in &mut self.cells {
            cell.reinitialize();
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn cell(&self, index: u8) -> Option<&Cell> {
        self.cells.get(index as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Current state, or `Unconnected` for an index past the end.
    pub fn get_state(&self, index: u8) -> CellState {
        self.cell(index).map_or(CellState::Unconnected, Cell::state)
    }

    /// Measurement served to callers for the cell at `index`.
    ///
    /// READY cells are read from the adapter; EMPTY cells report `0`
    /// without touching the adapter; every other state is an error.
    pub fn measurement<S: CellSensorPort>(
        &self,
        index: u8,
        sensor: &mut S,
    ) -> Result<u32, MeasureError> {
        let cell = self.cell(index).ok_or(MeasureError::InvalidIndex)?;
        match cell.state() {
            CellState::Ready => Ok(sensor.raw_measurement(cell.index())),
            CellState::Empty => Ok(0),
            _ => Err(MeasureError::InvalidMeasure),
        }
    }

    /// Sign-encoded form of [`measurement`](Self::measurement): a
    /// non-negative reading, or a negative error sentinel.
    ///
    /// Readings above `i32::MAX` saturate so they stay non-negative.
    pub fn get_measurement<S: CellSensorPort>(&self, index: u8, sensor: &mut S) -> i32 {
        match self.measurement(index, sensor) {
            Ok(raw) => i32::try_from(raw).unwrap_or(i32::MAX),
            Err(e) => e.code(),
        }
    }

    /// Advance every cell once, in index order.
    pub fn advance_all<S: CellSensorPort>(&mut self, fsm: &CellFsm<S>, sensor: &mut S) {
        for cell in &mut self.cells {
            fsm.advance(cell, sensor);
        }
    }
}
