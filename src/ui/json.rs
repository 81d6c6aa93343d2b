//! Machine-readable output for `--json`, one document per cycle.

use serde::Serialize;

use crate::core::probe::ProbeResult;
use crate::core::system_monitor::{Alert, ResourceSnapshot};
use crate::error::Result;

#[derive(Serialize)]
struct ProbeDocument<'a> {
    results: &'a [ProbeResult],
    up: usize,
    down: usize,
    unknown: usize,
    total: usize,
}

#[derive(Serialize)]
struct SystemDocument<'a> {
    snapshot: &'a ResourceSnapshot,
    alerts: &'a [Alert],
}

pub fn probe_json(results: &[ProbeResult]) -> Result<String> {
    use crate::core::probe::ProbeState;

    let doc = ProbeDocument {
        results,
        up: results.iter().filter(|r| r.state == ProbeState::Up).count(),
        down: results.iter().filter(|r| r.state == ProbeState::Down).count(),
        unknown: results.iter().filter(|r| r.state == ProbeState::Unknown).count(),
        total: results.len(),
    };
    Ok(serde_json::to_string(&doc)?)
}

pub fn system_json(snapshot: &ResourceSnapshot, alerts: &[Alert]) -> Result<String> {
    Ok(serde_json::to_string(&SystemDocument { snapshot, alerts })?)
}
