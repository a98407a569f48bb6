//! System configuration parameters
//!
//! The cell count is fixed at compile time (it sizes the registry array).
//! The remaining parameters default to the compile-time constants and can
//! be overridden at startup, then checked with [`SystemConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of physical oxygen cell slots.
pub const MAX_CELLS: usize = 2;

/// Calibration retries allowed before a cell is declared failed.
/// The cell fails on attempt `MAX_CALIBRATION_ATTEMPTS + 1`.
pub const MAX_CALIBRATION_ATTEMPTS: u8 = 5;

/// Delay between two polling sweeps.
pub const POLL_INTERVAL_MS: u32 = 2000;

/// Shortest polling interval accepted by [`SystemConfig::validate`].
pub const MIN_POLL_INTERVAL_MS: u32 = 10;

/// Longest polling interval accepted by [`SystemConfig::validate`].
pub const MAX_POLL_INTERVAL_MS: u32 = 600_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Failed calibration results tolerated before CALIBRATION_FAILED.
    pub max_calibration_attempts: u8,
    /// Blocking delay before each sweep (milliseconds).
    pub poll_interval_ms: u32,
    /// Emit a status report every N sweeps (0 = never).
    pub report_every_sweeps: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            max_calibration_attempts: MAX_CALIBRATION_ATTEMPTS,
            poll_interval_ms: POLL_INTERVAL_MS,
            report_every_sweeps: 30, // once a minute at the default interval
        }
    }
}

/// Environment variable overriding [`SystemConfig::poll_interval_ms`].
pub const ENV_POLL_MS: &str = "OXYCELL_POLL_MS";
/// Environment variable overriding [`SystemConfig::max_calibration_attempts`].
pub const ENV_MAX_ATTEMPTS: &str = "OXYCELL_MAX_ATTEMPTS";
/// Environment variable overriding [`SystemConfig::report_every_sweeps`].
pub const ENV_REPORT_EVERY: &str = "OXYCELL_REPORT_EVERY";

fn parse_override<T: core::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    err: &'static str,
) -> Result<Option<T>> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| Error::Config(err)),
        None => Ok(None),
    }
}

impl SystemConfig {
    /// Apply overrides from `lookup` (normally the process environment).
    ///
    /// Unset keys keep their current value; a set key that does not parse
    /// is an error rather than silently ignored.  The result is not
    /// validated.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = parse_override(&lookup, ENV_POLL_MS, "OXYCELL_POLL_MS is not a valid u32")? {
            self.poll_interval_ms = v;
        }
        if let Some(v) =
            parse_override(&lookup, ENV_MAX_ATTEMPTS, "OXYCELL_MAX_ATTEMPTS is not a valid u8")?
        {
            self.max_calibration_attempts = v;
        }
        if let Some(v) =
            parse_override(&lookup, ENV_REPORT_EVERY, "OXYCELL_REPORT_EVERY is not a valid u32")?
        {
            self.report_every_sweeps = v;
        }
        Ok(self)
    }

    /// Defaults with process environment overrides applied, then validated.
    pub fn from_env() -> Result<Self> {
        let config = Self::default().with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<()> {
        if self.max_calibration_attempts == 0 {
            return Err(Error::Config("max_calibration_attempts must be at least 1"));
        }
        // The u8 attempt counter must be able to go past the budget.
        if self.max_calibration_attempts == u8::MAX {
            return Err(Error::Config("max_calibration_attempts must be below 255"));
        }
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(Error::Config("poll_interval_ms must be between 10 and 600000"));
        }
        Ok(())
    }
}
