//! Startup configuration for both monitors.
//!
//! Everything here is parsed once from the command line and never mutated
//! afterwards. Validation failures are `PulseError::Config` /
//! `PulseError::InvalidThreshold` and stop the process before any sampling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::scheduler::RunMode;
use crate::core::system_monitor::Metric;
use crate::error::{PulseError, Result};
use crate::platform::default_disk_path;

pub const DEFAULT_THRESHOLD_PERCENT: u8 = 80;
pub const DEFAULT_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TOP_PROCESSES: usize = 5;

/// A URL or host to probe, kept exactly as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Target(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL actually requested. Bare hosts (`example.com`, `localhost:8080`)
    /// are probed over plain HTTP.
    pub fn request_url(&self) -> String {
        if self.0.contains("://") {
            self.0.clone()
        } else {
            format!("http://{}", self.0)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse targets from file contents: one per line, `#` comments and blank
/// lines skipped, input order preserved, duplicates kept.
pub fn parse_targets(contents: &str) -> Vec<Target> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Target::new)
        .collect()
}

/// Read a target file. An unreadable file or one without targets is a
/// configuration error.
pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let contents = fs::read_to_string(path).map_err(|source| PulseError::TargetFile {
        path: path.to_path_buf(),
        source,
    })?;

    let targets = parse_targets(&contents);
    if targets.is_empty() {
        return Err(PulseError::config(format!(
            "no targets found in {}",
            path.display()
        )));
    }

    Ok(targets)
}

/// Percentage limits per metric. An alert fires when a value is strictly
/// above its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub cpu: u8,
    pub memory: u8,
    pub disk: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_THRESHOLD_PERCENT,
            memory: DEFAULT_THRESHOLD_PERCENT,
            disk: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

impl Thresholds {
    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Memory => self.memory,
            Metric::Disk => self.disk,
        }
    }

    fn set(&mut self, metric: Metric, value: u8) {
        match metric {
            Metric::Cpu => self.cpu = value,
            Metric::Memory => self.memory = value,
            Metric::Disk => self.disk = value,
        }
    }
}

impl FromStr for Thresholds {
    type Err = PulseError;

    /// Parse `cpu=90,memory=85,disk=80`. Keys not mentioned keep their
    /// default; an empty string yields the defaults.
    fn from_str(s: &str) -> Result<Self> {
        let mut thresholds = Thresholds::default();

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                PulseError::invalid_threshold(format!("expected key=value, got '{}'", pair))
            })?;

            let metric: Metric = key.trim().parse()?;
            let value: u8 = value.trim().parse().map_err(|_| {
                PulseError::invalid_threshold(format!(
                    "'{}' is not a whole percentage for {}",
                    value.trim(),
                    metric
                ))
            })?;
            if value > 100 {
                return Err(PulseError::invalid_threshold(format!(
                    "{} threshold {} is above 100%",
                    metric, value
                )));
            }

            thresholds.set(metric, value);
        }

        Ok(thresholds)
    }
}

impl fmt::Display for Thresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU={}%, Memory={}%, Disk={}%",
            self.cpu, self.memory, self.disk
        )
    }
}

/// Settings for `pulsecheck app`
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub targets: Vec<Target>,
    pub timeout: Duration,
    /// Accept invalid TLS certificates. Off unless `--insecure` is given.
    pub accept_invalid_certs: bool,
    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment
    pub use_proxy: bool,
    pub mode: RunMode,
    pub log_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
            use_proxy: true,
            mode: RunMode::SingleShot,
            log_path: None,
            json: false,
        }
    }
}

impl ProbeSettings {
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(PulseError::config("no targets provided"));
        }
        if self.timeout.is_zero() {
            return Err(PulseError::config("timeout must be at least one second"));
        }
        if self.mode.is_continuous() && self.targets.len() > 1 {
            return Err(PulseError::config(format!(
                "continuous mode requires exactly one target, got {}",
                self.targets.len()
            )));
        }
        self.mode.validate()
    }
}

/// Settings for `pulsecheck sys`
#[derive(Debug, Clone)]
pub struct SystemSettings {
    pub thresholds: Thresholds,
    pub top_processes: usize,
    /// Any path on the filesystem whose utilisation is reported.
    pub disk_path: PathBuf,
    pub mode: RunMode,
    pub log_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            top_processes: DEFAULT_TOP_PROCESSES,
            disk_path: default_disk_path(),
            mode: RunMode::SingleShot,
            log_path: None,
            json: false,
        }
    }
}

impl SystemSettings {
    pub fn validate(&self) -> Result<()> {
        if self.top_processes == 0 {
            return Err(PulseError::config("--top must be at least 1"));
        }
        self.mode.validate()
    }
}
