//! Unified error types for the OxyCell firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level loop's error handling uniform.  All variants are `Copy` so
//! they can be passed through the registry and monitor without allocation.
//!
//! Measurement errors additionally carry a stable negative code so that
//! host applications can tell them apart from real readings by sign alone.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor input could not be read.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(&'static str),
    /// Peripheral or logger initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Measurement errors
// ---------------------------------------------------------------------------

/// Sentinel returned by [`CellRegistry::get_measurement`] for an
/// out-of-range cell index.
///
/// [`CellRegistry::get_measurement`]: crate::registry::CellRegistry::get_measurement
pub const ERROR_MAX_INDEX: i32 = -1;

/// Sentinel returned when the cell exists but is not READY or EMPTY.
pub const ERROR_INVALID_MEASURE: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    /// Requested cell index is at or above the registry capacity.
    InvalidIndex,
    /// The cell is not in a state where its reading means anything.
    InvalidMeasure,
}

impl MeasureError {
    /// Negative sentinel code for this error.
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidIndex => ERROR_MAX_INDEX,
            Self::InvalidMeasure => ERROR_INVALID_MEASURE,
        }
    }

    /// Decode a sentinel back into an error.  Non-negative values are
    /// readings, not errors, and yield `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            ERROR_MAX_INDEX => Some(Self::InvalidIndex),
            ERROR_INVALID_MEASURE => Some(Self::InvalidMeasure),
            _ => None,
        }
    }
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex => write!(f, "cell index out of range"),
            Self::InvalidMeasure => write!(f, "cell not calibrated"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Presence GPIO read returned an error.
    GpioReadFailed,
    /// No adapter slot exists for this cell index.
    NoSuchCell,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::NoSuchCell => write!(f, "no such cell"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
