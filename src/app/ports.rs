//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ OxygenMonitor (domain)
//! ```
//!
//! Driven adapters (cell hardware, event sinks) implement these traits.
//! The [`OxygenMonitor`](super::service::OxygenMonitor) and the FSM
//! consume them via generics, so the domain core never touches hardware
//! directly.  Blocking delays use [`embedded_hal::delay::DelayNs`]
//! rather than a port of our own.

use serde::Serialize;

// ───────────────────────────────────────────────────────────────
// Cell sensor port (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Outcome of the most recent calibration request on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalibrationResult {
    Ok,
    Failed,
}

/// Per-cell sensor access, addressed by cell index.
///
/// The FSM only calls what the current state needs: a READY cell is
/// never asked for its calibration result, and no cell is asked for a
/// measurement unless it is connected.
pub trait CellSensorPort {
    /// True if the cell is physically present.
    fn is_connected(&mut self, cell: u8) -> bool;

    /// Fire-and-forget calibration request.
    fn start_calibration(&mut self, cell: u8);

    /// Polled on every tick while calibrating.
    fn calibration_result(&mut self, cell: u8) -> CalibrationResult;

    /// Current reading.  `0` means empty / no signal.
    fn raw_measurement(&mut self, cell: u8) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`CellEvent`](super::events::CellEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// a host-side buffer, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::CellEvent);
}
