pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{daily_report, heat_pump_report, household_report};
pub use progress::ProgressReporter;
