//! Integration tests for the OxygenMonitor → FSM → EventSink pipeline.

use crate::mock_hw::{MockCells, RecordingSink, SensorCall};

use oxycell::adapters::sim::{SIM_DEFAULT_READING, SimCellBank};
use oxycell::app::events::CellEvent;
use oxycell::app::ports::CalibrationResult;
use oxycell::app::service::OxygenMonitor;
use oxycell::config::SystemConfig;
use oxycell::error::{ERROR_INVALID_MEASURE, MeasureError};
use oxycell::fsm::CellState;

fn make_monitor(report_every_sweeps: u32) -> (OxygenMonitor<MockCells>, MockCells, RecordingSink) {
    let config = SystemConfig {
        report_every_sweeps,
        ..SystemConfig::default()
    };
    let mut monitor = OxygenMonitor::new(config);
    let mut sink = RecordingSink::new();
    monitor.start(&mut sink);
    (monitor, MockCells::new(2), sink)
}

#[test]
fn sweep_visits_cells_in_index_order() {
    let (mut monitor, mut hw, mut sink) = make_monitor(0);
    monitor.sweep(&mut hw, &mut sink);

    let first_query_of = |cell: u8| {
        hw.calls
            .iter()
            .position(|c| *c == SensorCall::IsConnected(cell))
    };
    assert!(first_query_of(0) < first_query_of(1));
}

#[test]
fn reference_bank_reaches_expected_steady_state() {
    let mut monitor = OxygenMonitor::new(SystemConfig::default());
    let mut cells: SimCellBank = SimCellBank::new().with_faulty_cell(1);
    let mut sink = RecordingSink::new();
    monitor.start(&mut sink);

    for _ in 0..10 {
        monitor.sweep(&mut cells, &mut sink);
    }

    assert_eq!(monitor.state(0), CellState::Ready);
    assert_eq!(monitor.state(1), CellState::Unconnected);
    assert_eq!(monitor.measurement(0, &mut cells), SIM_DEFAULT_READING as i32);
    assert_eq!(monitor.measurement(1, &mut cells), ERROR_INVALID_MEASURE);
    assert_eq!(cells.calibration_starts(0), 1);
    assert_eq!(cells.calibration_starts(1), 0);
}

#[test]
fn disconnect_and_reconnect_emit_full_path() {
    let (mut monitor, mut hw, mut sink) = make_monitor(0);
    hw.set_connected(1, false);
    monitor.sweep(&mut hw, &mut sink);
    monitor.sweep(&mut hw, &mut sink);
    assert_eq!(monitor.state(0), CellState::Ready);

    sink.clear();
    hw.set_connected(0, false);
    monitor.sweep(&mut hw, &mut sink);
    hw.set_connected(0, true);
    monitor.sweep(&mut hw, &mut sink);
    monitor.sweep(&mut hw, &mut sink);
    monitor.sweep(&mut hw, &mut sink);

    let path: Vec<(CellState, CellState)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            CellEvent::StateChanged { cell: 0, from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        path,
        vec![
            (CellState::Ready, CellState::Unconnected),
            (CellState::Unconnected, CellState::Reset),
            (CellState::Reset, CellState::Calibrating),
            (CellState::Calibrating, CellState::Ready),
        ]
    );
    assert_eq!(monitor.state(1), CellState::Unconnected);
}

#[test]
fn budget_follows_configuration() {
    let config = SystemConfig {
        max_calibration_attempts: 1,
        report_every_sweeps: 0,
        ..SystemConfig::default()
    };
    let mut monitor = OxygenMonitor::new(config);
    let mut hw = MockCells::new(2);
    hw.set_calibration(0, CalibrationResult::Failed);
    let mut sink = RecordingSink::new();
    monitor.start(&mut sink);

    monitor.sweep(&mut hw, &mut sink); // Reset -> Calibrating
    monitor.sweep(&mut hw, &mut sink); // attempt 1, retry
    assert_eq!(monitor.state(0), CellState::Calibrating);
    monitor.sweep(&mut hw, &mut sink); // attempt 2 > 1
    assert_eq!(monitor.state(0), CellState::CalibrationFailed);
    assert!(
        sink.events
            .contains(&CellEvent::CalibrationFailed { cell: 0, attempts: 2 })
    );
    assert_eq!(
        monitor.try_measurement(0, &mut hw),
        Err(MeasureError::InvalidMeasure)
    );
}

#[test]
fn reports_follow_the_configured_period() {
    let (mut monitor, mut hw, mut sink) = make_monitor(3);
    for _ in 0..9 {
        monitor.sweep(&mut hw, &mut sink);
    }
    assert_eq!(sink.reports(), 3);

    let sweeps: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            CellEvent::Report(r) => Some(r.sweep),
            _ => None,
        })
        .collect();
    assert_eq!(sweeps, vec![3, 6, 9]);
}

#[test]
fn reports_disabled_with_zero_period() {
    let (mut monitor, mut hw, mut sink) = make_monitor(0);
    for _ in 0..50 {
        monitor.sweep(&mut hw, &mut sink);
    }
    assert_eq!(sink.reports(), 0);
    assert_eq!(monitor.sweep_count(), 50);
}

#[test]
fn build_report_matches_queries() {
    let (mut monitor, mut hw, mut sink) = make_monitor(0);
    hw.set_raw(1, 4321);
    monitor.sweep(&mut hw, &mut sink);
    monitor.sweep(&mut hw, &mut sink);

    let report = monitor.build_report(&mut hw);
    assert_eq!(report.sweep, 2);
    assert_eq!(report.cells.len(), 2);
    for status in &report.cells {
        assert_eq!(status.state, monitor.state(status.index));
        assert_eq!(status.measurement, monitor.measurement(status.index, &mut hw));
    }
    assert_eq!(report.cells[1].measurement, 4321);
}
