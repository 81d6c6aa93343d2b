use std::path::PathBuf;

use super::metrics::*;
use super::source::MetricSource;
use crate::core::config::SystemSettings;
use crate::error::{PulseError, Result};

/// Produces one `ResourceSnapshot` per call from a `MetricSource`.
pub struct ResourceSampler {
    source: Box<dyn MetricSource>,
    disk_path: PathBuf,
    top_processes: usize,
}

impl ResourceSampler {
    pub fn new(source: Box<dyn MetricSource>, settings: &SystemSettings) -> Self {
        Self {
            source,
            disk_path: settings.disk_path.clone(),
            top_processes: settings.top_processes,
        }
    }

    /// Take a snapshot. Never fails: anything unreadable becomes a gap.
    pub fn sample(&mut self) -> ResourceSnapshot {
        let mut snapshot = ResourceSnapshot::empty();

        if let Err(e) = self.source.refresh() {
            log::warn!("{}: refresh failed: {}", self.source.name(), e);
        }

        for metric in Metric::ALL {
            match self.read(metric) {
                Ok(value) => snapshot.set_value(metric, Some(value)),
                Err(e) => {
                    log::warn!("{} unavailable: {}", metric.label(), e);
                    snapshot.gaps.push(SamplingGap {
                        source: GapSource::Metric(metric),
                        reason: e.to_string(),
                    });
                }
            }
        }

        match self.source.processes() {
            Ok(processes) => {
                snapshot.top_processes = rank_top_processes(processes, self.top_processes);
            }
            Err(e) => {
                log::warn!("Process list unavailable: {}", e);
                snapshot.gaps.push(SamplingGap {
                    source: GapSource::Processes,
                    reason: e.to_string(),
                });
            }
        }

        snapshot
    }

    fn read(&mut self, metric: Metric) -> Result<f32> {
        let value = match metric {
            Metric::Cpu => self.source.cpu_percent()?,
            Metric::Memory => self.source.memory_percent()?,
            Metric::Disk => self.source.disk_percent(&self.disk_path)?,
        };

        if !value.is_finite() {
            return Err(PulseError::metric_unavailable(format!(
                "{} reading is not a number",
                metric
            )));
        }
        Ok(value.clamp(0.0, 100.0))
    }
}

/// Sort by CPU descending and keep the first `count`. The sort is stable, so
/// equal CPU values keep their input order. Non-finite CPU readings rank as 0.
pub fn rank_top_processes(mut processes: Vec<ProcessInfo>, count: usize) -> Vec<ProcessInfo> {
    for process in processes.iter_mut() {
        if !process.cpu_percent.is_finite() {
            process.cpu_percent = 0.0;
        }
    }
    processes.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));

    processes.truncate(count);
    processes
}
