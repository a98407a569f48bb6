//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, without closures or
//! dynamic dispatch.
//!
//! ```text
//!  RESET ──[connected]──▶ CALIBRATING ──[result OK]──▶ READY
//!    ▲                      │      ▲                     │
//!    │        [FAILED, attempts > max]  [FAILED]         [reading == 0]
//!    │                      ▼      └──────┘              ▼
//!    │              CALIBRATION_FAILED                 EMPTY
//!    │
//!  UNCONNECTED ◀──[not connected]── any state
//! ```
//!
//! EMPTY and CALIBRATION_FAILED only exit through UNCONNECTED: refilling
//! a cell or fixing its calibration requires removing it, so a reconnect
//! always recalibrates.

use super::context::CellContext;
use super::{CellState, StateDescriptor};
use crate::app::ports::{CalibrationResult, CellSensorPort};
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per FSM.
pub fn build_state_table<S: CellSensorPort>() -> [StateDescriptor<S>; CellState::COUNT] {
    [
        // Index 0 — Reset
        StateDescriptor {
            id: CellState::Reset,
            name: "Reset",
            on_enter: None,
            on_update: reset_update::<S>,
        },
        // Index 1 — Calibrating
        StateDescriptor {
            id: CellState::Calibrating,
            name: "Calibrating",
            on_enter: Some(calibrating_enter::<S>),
            on_update: calibrating_update::<S>,
        },
        // Index 2 — CalibrationFailed
        StateDescriptor {
            id: CellState::CalibrationFailed,
            name: "CalibrationFailed",
            on_enter: Some(calibration_failed_enter::<S>),
            on_update: sticky_update::<S>,
        },
        // Index 3 — Ready
        StateDescriptor {
            id: CellState::Ready,
            name: "Ready",
            on_enter: Some(ready_enter::<S>),
            on_update: ready_update::<S>,
        },
        // Index 4 — Empty
        StateDescriptor {
            id: CellState::Empty,
            name: "Empty",
            on_enter: Some(empty_enter::<S>),
            on_update: sticky_update::<S>,
        },
        // Index 5 — Unconnected
        StateDescriptor {
            id: CellState::Unconnected,
            name: "Unconnected",
            on_enter: Some(unconnected_enter::<S>),
            on_update: unconnected_update::<S>,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESET state
// ═══════════════════════════════════════════════════════════════════════════

fn reset_update<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) -> Option<CellState> {
    if ctx.is_connected() {
        Some(CellState::Calibrating)
    } else {
        Some(CellState::Unconnected)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CALIBRATING state — request issued on entry, result polled each tick
// ═══════════════════════════════════════════════════════════════════════════

fn calibrating_enter<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) {
    ctx.start_calibration();
    ctx.cell.calibration_attempts = 0;
    info!("Cell {}: calibration started", ctx.cell.index());
}

fn calibrating_update<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) -> Option<CellState> {
    if !ctx.is_connected() {
        info!(
            "Cell {}: removed during calibration (attempt {})",
            ctx.cell.index(),
            ctx.cell.calibration_attempts()
        );
        return Some(CellState::Unconnected);
    }

    // Every tick spent calibrating counts, whatever the result.
    let result = ctx.calibration_result();
    let attempt = ctx.bump_attempts();

    match result {
        CalibrationResult::Ok => Some(CellState::Ready),
        CalibrationResult::Failed if ctx.attempts_exhausted() => Some(CellState::CalibrationFailed),
        CalibrationResult::Failed => {
            debug!(
                "Cell {}: calibration attempt {}/{} failed, retrying",
                ctx.cell.index(),
                attempt,
                ctx.max_attempts
            );
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  READY state — calibrated, watching for the reading to drop to zero
// ═══════════════════════════════════════════════════════════════════════════

fn ready_enter<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) {
    info!(
        "Cell {}: calibrated after {} attempt(s)",
        ctx.cell.index(),
        ctx.cell.calibration_attempts()
    );
}

fn ready_update<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) -> Option<CellState> {
    if !ctx.is_connected() {
        return Some(CellState::Unconnected);
    }
    if ctx.raw_measurement() == 0 {
        return Some(CellState::Empty);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  Sticky states — EMPTY and CALIBRATION_FAILED
// ═══════════════════════════════════════════════════════════════════════════

fn empty_enter<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) {
    warn!("Cell {}: empty, remove and refill to continue", ctx.cell.index());
}

fn calibration_failed_enter<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) {
    warn!(
        "Cell {}: calibration failed after {} attempts, reconnect to retry",
        ctx.cell.index(),
        ctx.cell.calibration_attempts()
    );
}

fn sticky_update<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) -> Option<CellState> {
    if ctx.is_connected() {
        None
    } else {
        Some(CellState::Unconnected)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  UNCONNECTED state
// ═══════════════════════════════════════════════════════════════════════════

fn unconnected_enter<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) {
    info!("Cell {}: not connected", ctx.cell.index());
}

fn unconnected_update<S: CellSensorPort>(ctx: &mut CellContext<'_, S>) -> Option<CellState> {
    // A returning cell must be recalibrated.
    if ctx.is_connected() {
        Some(CellState::Reset)
    } else {
        None
    }
}
