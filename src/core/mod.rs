// Core business logic module

pub mod config;
pub mod probe;
pub mod report_log;
pub mod scheduler;
pub mod system_monitor;

// Re-export commonly used items
pub use config::{ProbeSettings, SystemSettings, Target, Thresholds};
pub use probe::{ProbeResult, ProbeState, Prober};
pub use report_log::ReportLog;
pub use scheduler::{RunMode, RunSummary, Scheduler, StopReason};
