use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::Target;

/// Derived reachability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeState {
    Up,
    Down,
    Unknown,
}

impl ProbeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeState::Up => "UP",
            ProbeState::Down => "DOWN",
            ProbeState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why no status code was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeFailure {
    Timeout,
    Error,
}

impl ProbeFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeFailure::Timeout => "TIMEOUT",
            ProbeFailure::Error => "ERROR",
        }
    }
}

/// Map an HTTP status code to a state and a human-readable message.
///
/// Valid codes are UP iff 200 <= code < 400. Values outside 100..=999 are not
/// HTTP status codes at all and come out UNKNOWN.
pub fn classify(code: u16) -> (ProbeState, String) {
    match code {
        200..=299 => (
            ProbeState::Up,
            "Application is functioning correctly".to_string(),
        ),
        300..=399 => (ProbeState::Up, "Application is up (redirect)".to_string()),
        400..=499 => (ProbeState::Down, format!("Client error (HTTP {})", code)),
        500..=599 => (ProbeState::Down, format!("Server error (HTTP {})", code)),
        100..=999 => (
            ProbeState::Down,
            format!("Unexpected status code: {}", code),
        ),
        _ => (
            ProbeState::Unknown,
            format!("Not an HTTP status code: {}", code),
        ),
    }
}

/// Outcome of one probe attempt. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub target: Target,
    pub status_code: Option<u16>,
    pub state: ProbeState,
    pub failure: Option<ProbeFailure>,
    pub message: String,
    /// Underlying transport error text, if any
    pub detail: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl ProbeResult {
    pub fn from_status(target: Target, code: u16) -> Self {
        let (state, message) = classify(code);
        Self {
            target,
            status_code: Some(code),
            state,
            failure: None,
            message,
            detail: None,
            timestamp: Local::now(),
        }
    }

    pub fn from_failure(target: Target, failure: ProbeFailure, detail: String) -> Self {
        Self {
            target,
            status_code: None,
            state: ProbeState::Down,
            failure: Some(failure),
            message: failure.as_str().to_string(),
            detail: Some(detail),
            timestamp: Local::now(),
        }
    }

    /// Status code, or the failure label when there is none
    pub fn code_label(&self) -> String {
        match (self.status_code, self.failure) {
            (Some(code), _) => code.to_string(),
            (None, Some(failure)) => failure.as_str().to_string(),
            (None, None) => "N/A".to_string(),
        }
    }
}
