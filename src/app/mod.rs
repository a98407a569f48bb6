//! Application core — pure domain logic, zero I/O.
//!
//! Orchestrates the per-cell FSM over the cell registry.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
