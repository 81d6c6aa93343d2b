// UI and formatting module

pub mod json;
pub mod messages;
pub mod report;
pub mod reporter;

// Re-export commonly used items for cleaner imports
pub use messages::{dimmed, error, info, warn};
pub use report::{
    format_timestamp, probe_summary, render_probe_report, render_probe_result,
    render_system_report, system_summary, Palette,
};
pub use reporter::Reporter;
