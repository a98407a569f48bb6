//! Blocking polling loop.
//!
//! Sleeps for the configured interval, then sweeps every cell.  The
//! delay provider is any [`DelayNs`]: `FreeRtos` on the device,
//! [`HostDelay`](crate::adapters::time::HostDelay) on a host, a
//! recording mock in tests.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{CellSensorPort, EventSink};
use crate::app::service::OxygenMonitor;

pub struct PollingDriver<D> {
    delay: D,
    interval_ms: u32,
}

impl<D: DelayNs> PollingDriver<D> {
    pub fn new(delay: D, interval_ms: u32) -> Self {
        Self { delay, interval_ms }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// One period: wait, then sweep.
    pub fn tick<S: CellSensorPort>(
        &mut self,
        monitor: &mut OxygenMonitor<S>,
        sensor: &mut S,
        sink: &mut impl EventSink,
    ) {
        self.delay.delay_ms(self.interval_ms);
        monitor.sweep(sensor, sink);
    }

    /// Run exactly `sweeps` periods and return.
    pub fn run_sweeps<S: CellSensorPort>(
        &mut self,
        monitor: &mut OxygenMonitor<S>,
        sensor: &mut S,
        sink: &mut impl EventSink,
        sweeps: u64,
    ) {
        for _ in 0..sweeps {
            self.tick(monitor, sensor, sink);
        }
    }

    /// Poll forever.
    pub fn run<S: CellSensorPort>(
        &mut self,
        monitor: &mut OxygenMonitor<S>,
        sensor: &mut S,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.tick(monitor, sensor, sink);
        }
    }

    pub fn into_delay(self) -> D {
        self.delay
    }
}
