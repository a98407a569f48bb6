//! Application service — the hexagonal core.
//!
//! [`OxygenMonitor`] owns the cell registry and the FSM.  It exposes a
//! hardware-agnostic API; the cell sensor adapter and the event sink are
//! injected at call sites, so the whole service runs against mocks.
//!
//! ```text
//!  CellSensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                     │      OxygenMonitor        │
//!                     │  Registry · FSM · Reports │
//!                     └──────────────────────────┘
//! ```

use log::{debug, info, log_enabled, Level};

use crate::config::{MAX_CELLS, SystemConfig};
use crate::error::MeasureError;
use crate::fsm::context::Cell;
use crate::fsm::{CellFsm, CellState};
use crate::registry::CellRegistry;

use super::events::{CellEvent, CellStatus, StatusReport};
use super::ports::{CellSensorPort, EventSink};

// ───────────────────────────────────────────────────────────────
// OxygenMonitor
// ───────────────────────────────────────────────────────────────

/// Polls every cell once per sweep and reports what changed.
pub struct OxygenMonitor<S> {
    /// Sized to match the `StatusReport` capacity.
    registry: CellRegistry<MAX_CELLS>,
    fsm: CellFsm<S>,
    config: SystemConfig,
    sweep_count: u64,
}

impl<S: CellSensorPort> OxygenMonitor<S> {
    /// Construct the monitor from configuration.
    ///
    /// Cells start in `Reset`; call [`start`](Self::start) before the
    /// first sweep.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            registry: CellRegistry::new(),
            fsm: CellFsm::new(config.max_calibration_attempts),
            config,
            sweep_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// (Re)initialise every cell and announce the monitor.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.registry.initialize();
        self.sweep_count = 0;
        for cell in self.registry.iter() {
            info!("Oxygen cell {} init done", cell.index());
        }
        sink.emit(&CellEvent::Started {
            cells: self.registry.len(),
        });
    }

    // ── Per-sweep orchestration ───────────────────────────────

    /// Advance every cell once, in index order, and emit what changed.
    pub fn sweep(&mut self, sensor: &mut S, sink: &mut impl EventSink) {
        for cell in self.registry.iter_mut() {
            if log_enabled!(Level::Debug) {
                trace_cell(cell, sensor);
            }

            let before = *cell;
            self.fsm.advance(cell, sensor);
            emit_changes(&before, cell, sink);
        }

        self.sweep_count += 1;

        let every = u64::from(self.config.report_every_sweeps);
        if every > 0 && self.sweep_count % every == 0 {
            let report = self.build_report(sensor);
            sink.emit(&CellEvent::Report(report));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current state of cell `index`; `Unconnected` past the end.
    pub fn state(&self, index: u8) -> CellState {
        self.registry.get_state(index)
    }

    /// Reading of cell `index`, or a negative error sentinel.
    pub fn measurement(&self, index: u8, sensor: &mut S) -> i32 {
        self.registry.get_measurement(index, sensor)
    }

    /// Typed form of [`measurement`](Self::measurement).
    pub fn try_measurement(&self, index: u8, sensor: &mut S) -> Result<u32, MeasureError> {
        self.registry.measurement(index, sensor)
    }

    /// Snapshot every cell.  Reads the adapter for READY cells.
    pub fn build_report(&self, sensor: &mut S) -> StatusReport {
        let mut report = StatusReport {
            sweep: self.sweep_count,
            cells: heapless::Vec::new(),
        };
        for cell in self.registry.iter() {
            let status = CellStatus {
                index: cell.index(),
                state: cell.state(),
                measurement: self.registry.get_measurement(cell.index(), sensor),
                calibration_attempts: cell.calibration_attempts(),
            };
            let pushed = report.cells.push(status);
            debug_assert!(pushed.is_ok(), "report capacity must match the registry");
        }
        report
    }

    pub fn registry(&self) -> &CellRegistry<MAX_CELLS> {
        &self.registry
    }

    pub fn sweep_count(&self) -> u64 {
        self.sweep_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}

// ── Private helpers ───────────────────────────────────────────

fn trace_cell<S: CellSensorPort>(cell: &Cell, sensor: &mut S) {
    let measure = match cell.state() {
        CellState::Ready => {
            let raw = sensor.raw_measurement(cell.index());
            i32::try_from(raw).unwrap_or(i32::MAX)
        }
        CellState::Empty => 0,
        _ => MeasureError::InvalidMeasure.code(),
    };
    debug!(
        "Oxygen cell {} status: {}, measure: {}",
        cell.index(),
        cell.state(),
        measure
    );
}

fn emit_changes(before: &Cell, after: &Cell, sink: &mut impl EventSink) {
    let index = after.index();

    if before.state() != after.state() {
        sink.emit(&CellEvent::StateChanged {
            cell: index,
            from: before.state(),
            to: after.state(),
        });
    }

    match (before.state(), after.state()) {
        (CellState::Calibrating, CellState::Calibrating)
            if after.calibration_attempts() > before.calibration_attempts() =>
        {
            sink.emit(&CellEvent::CalibrationRetry {
                cell: index,
                attempt: after.calibration_attempts(),
            });
        }
        (CellState::Calibrating, CellState::CalibrationFailed) => {
            sink.emit(&CellEvent::CalibrationFailed {
                cell: index,
                attempts: after.calibration_attempts(),
            });
        }
        _ => {}
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
