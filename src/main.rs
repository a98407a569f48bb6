//! OxyCell Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SimCellBank        LogEventSink       FreeRtos/HostDelay│
//! │  (CellSensorPort)   (EventSink)        (DelayNs)         │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │          OxygenMonitor (pure logic)                │  │
//! │  │          Registry · Cell FSM · Reports             │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  PollingDriver: delay → sweep, forever                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use oxycell::adapters::log_sink::LogEventSink;
use oxycell::adapters::sim::SimCellBank;
use oxycell::app::service::OxygenMonitor;
use oxycell::config::{MAX_CELLS, SystemConfig};
use oxycell::driver::PollingDriver;

/// Slot wired to the disconnected reference cell on the bench rig.
const FAULTY_CELL: u8 = 1;

fn main() -> Result<()> {
    // ── 1. Runtime + logging ──────────────────────────────────
    #[cfg(feature = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(all(not(feature = "espidf"), not(target_os = "espidf")))]
    oxycell::adapters::console::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║   OxyCell Firmware v{}            ║", env!("CARGO_PKG_VERSION"));
    info!("║   Oxygen cell monitor ({} slots)      ║", MAX_CELLS);
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::from_env()?;
    info!(
        "Config: poll={}ms max_attempts={} report_every={}",
        config.poll_interval_ms, config.max_calibration_attempts, config.report_every_sweeps
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let mut cells: SimCellBank = SimCellBank::new().with_faulty_cell(FAULTY_CELL);
    let mut sink = LogEventSink::new();

    #[cfg(feature = "espidf")]
    let delay = esp_idf_hal::delay::FreeRtos;
    #[cfg(not(feature = "espidf"))]
    let delay = oxycell::adapters::time::HostDelay::new();

    // ── 4. Domain core ────────────────────────────────────────
    let mut monitor: OxygenMonitor<SimCellBank> = OxygenMonitor::new(config.clone());
    monitor.start(&mut sink);

    // ── 5. Poll forever ───────────────────────────────────────
    let mut driver = PollingDriver::new(delay, config.poll_interval_ms);
    driver.run(&mut monitor, &mut cells, &mut sink)
}
