//! Control logic: the threshold engine and the status classification that
//! the display layer shows next to it.

pub mod engine;
pub mod status;

pub use engine::{ControlEngine, Evaluation, Transition};
pub use status::StatusReport;
