//! Host resource metrics.
//!
//! sysinfo already carries one backend per OS, so a single `MetricSource`
//! implementation covers Linux, macOS and Windows.

mod sysinfo_source;

pub use sysinfo_source::SysinfoSource;

use std::path::PathBuf;

use crate::core::system_monitor::MetricSource;

/// Metric source for the current host
pub fn get_metric_source() -> Box<dyn MetricSource> {
    Box::new(SysinfoSource::new())
}

/// Filesystem whose utilisation is reported when `--disk` is not given
pub fn default_disk_path() -> PathBuf {
    #[cfg(windows)]
    {
        let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        PathBuf::from(format!("{}\\", drive))
    }

    #[cfg(not(windows))]
    {
        PathBuf::from("/")
    }
}
