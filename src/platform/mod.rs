// Platform-specific code module

pub mod system;

// Re-exports for cleaner imports
pub use system::{default_disk_path, get_metric_source, SysinfoSource};
