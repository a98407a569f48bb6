//! GPIO presence detection for cell slots.
//!
//! Each slot has a presence switch wired to a digital input.  This
//! adapter answers `is_connected` from those pins and forwards the
//! calibration and measurement queries to an inner [`CellSensorPort`]
//! (the cell's measurement front-end).
//!
//! A failed pin read is logged and reported as "not connected": a slot
//! we cannot see is treated as empty, which sends its cell back through
//! recalibration once the pin reads again.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::{CalibrationResult, CellSensorPort};
use crate::error::{Result, SensorError};

/// Electrical level that means "cell present".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceLevel {
    /// Pull-up input shorted to ground by the inserted cell.
    ActiveLow,
    ActiveHigh,
}

pub struct PresenceGated<P, S, const N: usize> {
    pins: [P; N],
    level: PresenceLevel,
    inner: S,
}

impl<P: InputPin, S: CellSensorPort, const N: usize> PresenceGated<P, S, N> {
    pub fn new(pins: [P; N], level: PresenceLevel, inner: S) -> Self {
        Self { pins, level, inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Read the presence pin for `cell`.
    pub fn read_presence(&mut self, cell: u8) -> Result<bool> {
        let pin = self
            .pins
            .get_mut(cell as usize)
            .ok_or(SensorError::NoSuchCell)?;
        let level = match self.level {
            PresenceLevel::ActiveLow => pin.is_low(),
            PresenceLevel::ActiveHigh => pin.is_high(),
        };
        level.map_err(|_| SensorError::GpioReadFailed.into())
    }
}

impl<P: InputPin, S: CellSensorPort, const N: usize> CellSensorPort for PresenceGated<P, S, N> {
    fn is_connected(&mut self, cell: u8) -> bool {
        match self.read_presence(cell) {
            Ok(present) => present,
            Err(e) => {
                warn!("Cell {}: presence read failed ({}), assuming removed", cell, e);
                false
            }
        }
    }

    fn start_calibration(&mut self, cell: u8) {
        self.inner.start_calibration(cell);
    }

    fn calibration_result(&mut self, cell: u8) -> CalibrationResult {
        self.inner.calibration_result(cell)
    }

    fn raw_measurement(&mut self, cell: u8) -> u32 {
        self.inner.raw_measurement(cell)
    }
}
