//! OxyCell firmware library.
//!
//! Per-cell calibration state machine, cell registry and polling loop for
//! a bank of oxygen sensor cells.  Everything here is hardware-agnostic;
//! the device and the host differ only in the adapters `main` wires in.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod driver;
pub mod error;
pub mod fsm;
pub mod registry;
