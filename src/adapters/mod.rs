//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to               |
//! |-------------|--------------|---------------------------|
//! | `log_sink`  | EventSink    | `log` facade              |
//! | `simulated` | SensorPort   | Random-walk environment   |
//! |             | ActuatorPort | In-memory outputs         |
//! | `time`      | ClockPort    | Host local time           |

pub mod log_sink;
pub mod simulated;
pub mod time;
