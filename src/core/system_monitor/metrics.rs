use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PulseError;

/// The thresholded resource metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Memory,
    Disk,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cpu, Metric::Memory, Metric::Disk];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
            Metric::Disk => "disk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Memory => "Memory",
            Metric::Disk => "Disk",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Metric::Cpu),
            "memory" | "mem" => Ok(Metric::Memory),
            "disk" => Ok(Metric::Disk),
            other => Err(PulseError::invalid_threshold(format!(
                "unknown metric '{}' (expected cpu, memory or disk)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub user: String,
    pub command: String,
}

/// What a sampling gap refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSource {
    Metric(Metric),
    Processes,
}

impl fmt::Display for GapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapSource::Metric(metric) => f.write_str(metric.label()),
            GapSource::Processes => f.write_str("Process list"),
        }
    }
}

/// A metric that could not be read on this host this cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingGap {
    pub source: GapSource,
    pub reason: String,
}

/// One point-in-time capture. `None` means unavailable, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub timestamp: DateTime<Local>,
    pub cpu_percent: Option<f32>,
    pub memory_percent: Option<f32>,
    pub disk_percent: Option<f32>,
    /// Descending by `cpu_percent`, ties in process-table order
    pub top_processes: Vec<ProcessInfo>,
    pub gaps: Vec<SamplingGap>,
}

impl ResourceSnapshot {
    /// Snapshot stamped now with every field unavailable
    pub fn empty() -> Self {
        Self {
            timestamp: Local::now(),
            cpu_percent: None,
            memory_percent: None,
            disk_percent: None,
            top_processes: Vec::new(),
            gaps: Vec::new(),
        }
    }

    pub fn value(&self, metric: Metric) -> Option<f32> {
        match metric {
            Metric::Cpu => self.cpu_percent,
            Metric::Memory => self.memory_percent,
            Metric::Disk => self.disk_percent,
        }
    }

    pub fn set_value(&mut self, metric: Metric, value: Option<f32>) {
        match metric {
            Metric::Cpu => self.cpu_percent = value,
            Metric::Memory => self.memory_percent = value,
            Metric::Disk => self.disk_percent = value,
        }
    }

    /// Number of thresholded metrics that were actually read
    pub fn sampled_count(&self) -> usize {
        Metric::ALL
            .iter()
            .filter(|m| self.value(**m).is_some())
            .count()
    }
}
