//! Fuzz target: cell FSM and registry
//!
//! Each input byte drives one sweep.  Bits 0-1 set connectivity of the
//! two cells, bits 2-3 their calibration results, bits 4-5 whether their
//! reading drops to zero, and bits 6-7 pick an index to query.  Checks:
//! - No panics for any adapter behaviour or query index
//! - Attempt counters never pass the budget by more than one
//! - Measurement sign always matches the cell's state
//!
//! cargo fuzz run fuzz_cell_fsm

#![no_main]

use libfuzzer_sys::fuzz_target;
use oxycell::adapters::sim::SimCellBank;
use oxycell::app::ports::CalibrationResult;
use oxycell::config::MAX_CALIBRATION_ATTEMPTS;
use oxycell::error::{ERROR_INVALID_MEASURE, ERROR_MAX_INDEX};
use oxycell::fsm::{CellFsm, CellState};
use oxycell::registry::CellRegistry;

fuzz_target!(|data: &[u8]| {
    let fsm = CellFsm::new(MAX_CALIBRATION_ATTEMPTS);
    let mut reg: CellRegistry = CellRegistry::new();
    let mut sim: SimCellBank = SimCellBank::new();

    for &byte in data {
        for cell in 0..2u8 {
            let bit = |n: u8| byte & (1 << (n + cell)) != 0;
            sim.set_connected(cell, bit(0));
            sim.set_calibration_result(
                cell,
                if bit(2) { CalibrationResult::Ok } else { CalibrationResult::Failed },
            );
            sim.set_raw_measurement(cell, if bit(4) { 0 } else { u32::from(byte) + 1 });
        }

        reg.advance_all(&fsm, &mut sim);

        for cell in reg.iter() {
            assert!(cell.calibration_attempts() <= MAX_CALIBRATION_ATTEMPTS + 1);
        }

        let index = byte >> 6;
        let m = reg.get_measurement(index, &mut sim);
        match reg.cell(index).map(|c| c.state()) {
            None => assert_eq!(m, ERROR_MAX_INDEX),
            Some(CellState::Ready | CellState::Empty) => assert!(m >= 0),
            Some(_) => assert_eq!(m, ERROR_INVALID_MEASURE),
        }
    }
});
