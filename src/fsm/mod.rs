//! Function-pointer finite state machine engine for oxygen cells.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable (one per sensor adapter type)                     │
//! │  ┌───────────────────┬───────────┬────────────────────────┐   │
//! │  │ CellState         │ on_enter  │ on_update              │   │
//! │  ├───────────────────┼───────────┼────────────────────────┤   │
//! │  │ Reset             │ —         │ fn(ctx)->Option<>      │   │
//! │  │ Calibrating       │ fn(ctx)   │ fn(ctx)->Option<>      │   │
//! │  │ CalibrationFailed │ fn(ctx)   │ fn(ctx)->Option<>      │   │
//! │  │ Ready             │ fn(ctx)   │ fn(ctx)->Option<>      │   │
//! │  │ Empty             │ fn(ctx)   │ fn(ctx)->Option<>      │   │
//! │  │ Unconnected       │ fn(ctx)   │ fn(ctx)->Option<>      │   │
//! │  └───────────────────┴───────────┴────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike a system-wide FSM, the engine holds no current state of its
//! own: each [`Cell`] carries its state, and one table drives every cell.
//! Each tick, [`CellFsm::advance`] calls `on_update` for the cell's
//! current state.  If it returns `Some(next)`, the engine stores `next`
//! in the cell and runs `on_enter` for it.

pub mod context;
pub mod states;

use core::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::app::ports::CellSensorPort;
use context::{Cell, CellContext};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Lifecycle state of one oxygen cell.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum CellState {
    /// Freshly powered or reconnected; not calibrated.
    Reset = 0,
    /// Calibration requested, polling for its result.
    Calibrating = 1,
    /// Calibration budget exhausted.  Sticky until disconnected.
    CalibrationFailed = 2,
    /// Calibrated and reporting measurements.
    Ready = 3,
    /// Reading dropped to zero while ready.  Sticky until disconnected.
    Empty = 4,
    /// No cell detected in the slot.
    Unconnected = 5,
}

impl CellState {
    /// Total number of states; sizes the table array.
    pub const COUNT: usize = 6;

    pub const ALL: [CellState; Self::COUNT] = [
        Self::Reset,
        Self::Calibrating,
        Self::CalibrationFailed,
        Self::Ready,
        Self::Empty,
        Self::Unconnected,
    ];

    /// Decode a raw state code.  Unknown codes decode as `Unconnected`:
    /// a cell whose state cannot be trusted is treated as absent until it
    /// is seen again and recalibrated.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Reset,
            1 => Self::Calibrating,
            2 => Self::CalibrationFailed,
            3 => Self::Ready,
            4 => Self::Empty,
            5 => Self::Unconnected,
            _ => {
                warn!("invalid cell state code {raw}, falling back to Unconnected");
                Self::Unconnected
            }
        }
    }

    /// Stable numeric code (also the table index).
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "Reset",
            Self::Calibrating => "Calibrating",
            Self::CalibrationFailed => "CalibrationFailed",
            Self::Ready => "Ready",
            Self::Empty => "Empty",
            Self::Unconnected => "Unconnected",
        }
    }
}

impl From<u8> for CellState {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.  Runs once on each transition.
pub type StateActionFn<S> = fn(&mut CellContext<'_, S>);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn<S> = fn(&mut CellContext<'_, S>) -> Option<CellState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor<S> {
    pub id: CellState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<S>>,
    pub on_update: StateUpdateFn<S>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The cell state machine.
///
/// Owns the state table and the calibration budget; cells and the sensor
/// adapter are lent to it on every [`advance`](Self::advance).
pub struct CellFsm<S> {
    /// Fixed-size table indexed by `CellState as usize`.
    table: [StateDescriptor<S>; CellState::COUNT],
    max_attempts: u8,
}

impl<S: CellSensorPort> CellFsm<S> {
    /// Build the FSM with the given calibration retry budget.
    pub fn new(max_attempts: u8) -> Self {
        Self {
            table: states::build_state_table(),
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    /// Advance one cell by one tick.
    ///
    /// 1. Call `on_update` for the cell's current state.
    /// 2. If it returns `Some(next)`, store `next` and run its `on_enter`.
    ///
    /// Only `cell` and the adapter calls made for `cell.index()` are
    /// affected; other cells are never touched.
    pub fn advance(&self, cell: &mut Cell, sensor: &mut S) {
        let mut ctx = CellContext {
            cell,
            sensor,
            max_attempts: self.max_attempts,
        };

        let current = ctx.cell.state as usize;
        let next = (self.table[current].on_update)(&mut ctx);

        if let Some(next_id) = next {
            self.transition(next_id, &mut ctx);
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&self, next_id: CellState, ctx: &mut CellContext<'_, S>) {
        let next_idx = next_id as usize;

        info!(
            "Cell {}: {} -> {}",
            ctx.cell.index(),
            self.table[ctx.cell.state as usize].name,
            self.table[next_idx].name
        );

        ctx.cell.state = self.table[next_idx].id;

        if let Some(enter) = self.table[next_idx].on_enter {
            enter(ctx);
        }
    }
}
