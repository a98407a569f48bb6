//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements      | Connects to                        |
//! |-------------|-----------------|------------------------------------|
//! | `sim`       | CellSensorPort  | Injectable in-memory cell bank     |
//! | `presence`  | CellSensorPort  | GPIO presence pins + inner sensor  |
//! | `log_sink`  | EventSink       | `log` facade (serial / stderr)     |
//! | `time`      | DelayNs         | `std::thread::sleep`               |
//! | `console`   | env_logger      | Host stderr                        |

#[cfg(not(target_os = "espidf"))]
pub mod console;
pub mod log_sink;
pub mod presence;
pub mod sim;
pub mod time;
