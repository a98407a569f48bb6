//! End-to-end cell FSM scenarios against a recording mock adapter.

use crate::mock_hw::{MockCells, SensorCall};

use oxycell::app::ports::CalibrationResult;
use oxycell::config::MAX_CALIBRATION_ATTEMPTS;
use oxycell::error::{ERROR_INVALID_MEASURE, ERROR_MAX_INDEX};
use oxycell::fsm::context::Cell;
use oxycell::fsm::{CellFsm, CellState};
use oxycell::registry::CellRegistry;

fn fsm() -> CellFsm<MockCells> {
    CellFsm::new(MAX_CALIBRATION_ATTEMPTS)
}

// ── Full lifecycle ────────────────────────────────────────────

#[test]
fn round_trip_takes_five_advances() {
    let fsm = fsm();
    let mut hw = MockCells::new(1);
    let mut cell = Cell::new(0);

    hw.queue_connected(0, &[true, true, true, false, true]);
    hw.queue_calibration(0, &[CalibrationResult::Ok]);
    hw.queue_raw(0, &[0]);

    let mut seen = Vec::new();
    for _ in 0..5 {
        fsm.advance(&mut cell, &mut hw);
        seen.push(cell.state());
    }

    assert_eq!(
        seen,
        vec![
            CellState::Calibrating,
            CellState::Ready,
            CellState::Empty,
            CellState::Unconnected,
            CellState::Reset,
        ]
    );
}

#[test]
fn failing_calibration_exhausts_budget_on_sixth_attempt() {
    let fsm = fsm();
    let mut hw = MockCells::new(1);
    hw.set_calibration(0, CalibrationResult::Failed);
    let mut cell = Cell::new(0);

    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Calibrating);
    assert_eq!(cell.calibration_attempts(), 0);

    let mut attempts = Vec::new();
    let mut states = Vec::new();
    for _ in 0..6 {
        fsm.advance(&mut cell, &mut hw);
        attempts.push(cell.calibration_attempts());
        states.push(cell.state());
    }

    assert_eq!(attempts, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        states,
        vec![
            CellState::Calibrating,
            CellState::Calibrating,
            CellState::Calibrating,
            CellState::Calibrating,
            CellState::Calibrating,
            CellState::CalibrationFailed,
        ]
    );
    assert_eq!(hw.count(SensorCall::StartCalibration(0)), 1);
}

#[test]
fn failed_cell_recalibrates_only_after_reconnect() {
    let fsm = fsm();
    let mut hw = MockCells::new(1);
    hw.set_calibration(0, CalibrationResult::Ok);
    let mut cell = Cell::from_parts(0, CellState::CalibrationFailed, 6);

    for _ in 0..3 {
        fsm.advance(&mut cell, &mut hw);
        assert_eq!(cell.state(), CellState::CalibrationFailed);
    }

    hw.queue_connected(0, &[false]);
    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Unconnected);
    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Reset);
    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Calibrating);
    assert_eq!(cell.calibration_attempts(), 0);
    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Ready);
}

#[test]
fn ok_result_wins_regardless_of_attempts() {
    let fsm = fsm();
    let mut hw = MockCells::new(1);
    let mut cell = Cell::from_parts(0, CellState::Calibrating, MAX_CALIBRATION_ATTEMPTS);

    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Ready);
}

#[test]
fn removal_mid_calibration_abandons_it() {
    let fsm = fsm();
    let mut hw = MockCells::new(1);
    hw.set_calibration(0, CalibrationResult::Failed);
    let mut cell = Cell::from_parts(0, CellState::Calibrating, 3);

    hw.queue_connected(0, &[false]);
    fsm.advance(&mut cell, &mut hw);

    assert_eq!(cell.state(), CellState::Unconnected);
    assert_eq!(hw.count(SensorCall::CalibrationResult(0)), 0);
}

// ── Which queries each state makes ────────────────────────────

#[test]
fn each_state_only_queries_what_it_needs() {
    let fsm = fsm();
    let cases = [
        (CellState::Reset, vec![SensorCall::IsConnected(0), SensorCall::StartCalibration(0)]),
        (CellState::Calibrating, vec![SensorCall::IsConnected(0), SensorCall::CalibrationResult(0)]),
        (CellState::Ready, vec![SensorCall::IsConnected(0), SensorCall::RawMeasurement(0)]),
        (CellState::Empty, vec![SensorCall::IsConnected(0)]),
        (CellState::CalibrationFailed, vec![SensorCall::IsConnected(0)]),
        (CellState::Unconnected, vec![SensorCall::IsConnected(0)]),
    ];

    for (state, expected) in cases {
        let mut hw = MockCells::new(1);
        let mut cell = Cell::from_parts(0, state, 0);
        fsm.advance(&mut cell, &mut hw);
        assert_eq!(hw.calls, expected, "queries made from {:?}", state);
    }
}

#[test]
fn advance_never_touches_other_cells() {
    let fsm = fsm();
    let mut hw = MockCells::new(2);
    for state in [CellState::Reset, CellState::Calibrating, CellState::Ready] {
        let mut cell = Cell::from_parts(1, state, 0);
        fsm.advance(&mut cell, &mut hw);
    }
    assert!(hw.calls_for(0).is_empty());
    assert!(!hw.calls_for(1).is_empty());
}

#[test]
fn corrupted_state_code_recovers_through_unconnected() {
    let fsm = fsm();
    let mut hw = MockCells::new(1);
    let mut cell = Cell::from_raw(0, 0xEE, 9);
    assert_eq!(cell.state(), CellState::Unconnected);

    fsm.advance(&mut cell, &mut hw);
    assert_eq!(cell.state(), CellState::Reset);
}

// ── Registry measurement contract ─────────────────────────────

#[test]
fn empty_measurement_is_zero_without_a_query() {
    let fsm = fsm();
    let mut reg: CellRegistry = CellRegistry::new();
    let mut hw = MockCells::new(2);
    hw.queue_raw(0, &[0]);

    reg.advance_all(&fsm, &mut hw); // Calibrating
    reg.advance_all(&fsm, &mut hw); // Ready
    reg.advance_all(&fsm, &mut hw); // cell 0 reads 0 -> Empty
    assert_eq!(reg.get_state(0), CellState::Empty);
    assert_eq!(reg.get_state(1), CellState::Ready);

    hw.clear_calls();
    assert_eq!(reg.get_measurement(0, &mut hw), 0);
    assert!(hw.calls.is_empty());

    assert_eq!(reg.get_measurement(1, &mut hw), 1000);
    assert_eq!(hw.calls, vec![SensorCall::RawMeasurement(1)]);
}

#[test]
fn measurement_errors_are_negative_and_distinct() {
    let reg: CellRegistry = CellRegistry::new();
    let mut hw = MockCells::new(2);

    assert!(ERROR_MAX_INDEX < 0 && ERROR_INVALID_MEASURE < 0);
    assert_ne!(ERROR_MAX_INDEX, ERROR_INVALID_MEASURE);
    assert_eq!(reg.get_measurement(0, &mut hw), ERROR_INVALID_MEASURE);
    assert_eq!(reg.get_measurement(2, &mut hw), ERROR_MAX_INDEX);
    assert_eq!(reg.get_state(2), CellState::Unconnected);
    assert!(hw.calls.is_empty());
}
