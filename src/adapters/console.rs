//! Host console logger.
//!
//! On the device the `esp_idf_logger` backend routes the `log` facade to
//! the IDF console.  On a host `env_logger` writes to stderr instead, with
//! its filter read from `OXYCELL_LOG` (same syntax as `RUST_LOG`, e.g.
//! `debug` or `oxycell::fsm=trace`), default `info`.

use env_logger::{Builder, Env};

use crate::error::{Error, Result};

/// Environment variable holding the host log filter.
pub const ENV_LOG_LEVEL: &str = "OXYCELL_LOG";

/// Filter applied when `OXYCELL_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

fn builder_from(var: &'static str) -> Builder {
    Builder::from_env(Env::new().filter_or(var, DEFAULT_LOG_FILTER))
}

/// Install `env_logger` with the filter from `OXYCELL_LOG`.  Fails if a
/// logger is already installed.
pub fn init() -> Result<()> {
    builder_from(ENV_LOG_LEVEL)
        .try_init()
        .map_err(|_| Error::Init("a logger is already installed"))
}
