use std::path::Path;

use super::metrics::ProcessInfo;
use crate::error::Result;

/// Host capability for reading resource metrics.
///
/// Implementations live in the platform layer. Every method may fail
/// independently; the sampler turns a failure into a gap for that field only.
pub trait MetricSource {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Refresh cached state before a round of reads
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    /// Whole-system CPU utilisation, 0-100
    fn cpu_percent(&mut self) -> Result<f32>;

    /// Used memory as a share of total, 0-100
    fn memory_percent(&mut self) -> Result<f32>;

    /// Utilisation of the filesystem that holds `path`, 0-100
    fn disk_percent(&mut self, path: &Path) -> Result<f32>;

    /// Every process in process-table order, unranked
    fn processes(&mut self) -> Result<Vec<ProcessInfo>>;
}
