//! Blocking delay for host builds.
//!
//! With the `espidf` feature the binary uses `esp_idf_hal::delay::FreeRtos`,
//! which already implements [`DelayNs`].  Everywhere else [`HostDelay`]
//! sleeps the calling thread.

use embedded_hal::delay::DelayNs;
use std::time::Duration;

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

impl HostDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
