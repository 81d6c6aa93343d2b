use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for pulsecheck
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Cannot read target file {path:?}: {source}")]
    TargetFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metric unavailable: {0}")]
    MetricUnavailable(String),

    #[error("Report log error: {0}")]
    ReportLog(String),
}

/// Result type alias for pulsecheck
pub type Result<T> = std::result::Result<T, PulseError>;

impl PulseError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PulseError::Config(msg.into())
    }

    /// Create an invalid threshold error
    pub fn invalid_threshold<S: Into<String>>(msg: S) -> Self {
        PulseError::InvalidThreshold(msg.into())
    }

    pub fn metric_unavailable<S: Into<String>>(msg: S) -> Self {
        PulseError::MetricUnavailable(msg.into())
    }

    pub fn report_log<S: Into<String>>(msg: S) -> Self {
        PulseError::ReportLog(msg.into())
    }

    /// True for errors the user can fix by changing command-line input
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PulseError::Config(_) | PulseError::InvalidThreshold(_) | PulseError::TargetFile { .. }
        )
    }
}
