//! Threshold evaluation.
//!
//! Compares a snapshot against the configured limits. Stateless: the same
//! snapshot and thresholds always give the same alerts, and nothing is
//! remembered between cycles.

use super::metrics::{Metric, ResourceSnapshot};
use crate::core::config::Thresholds;
use serde::{Deserialize, Serialize};

/// Observed values at or above this are critical regardless of the limit.
pub const CRITICAL_PERCENT: f32 = 95.0;

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub metric: Metric,
    pub value: f32,
    pub threshold: u8,
    pub severity: AlertSeverity,
}

impl Alert {
    pub fn message(&self) -> String {
        format!(
            "{} usage is HIGH: {:.1}% (threshold: {}%)",
            self.metric.label(),
            self.value,
            self.threshold
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    fn for_value(value: f32) -> Self {
        if value >= CRITICAL_PERCENT {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }
}

/// One alert per available metric strictly above its threshold, in
/// cpu, memory, disk order. Unavailable metrics never alert.
pub fn evaluate_alerts(snapshot: &ResourceSnapshot, thresholds: &Thresholds) -> Vec<Alert> {
    Metric::ALL
        .iter()
        .filter_map(|&metric| {
            let value = snapshot.value(metric)?;
            let threshold = thresholds.get(metric);
            (value > f32::from(threshold)).then(|| Alert {
                metric,
                value,
                threshold,
                severity: AlertSeverity::for_value(value),
            })
        })
        .collect()
}
