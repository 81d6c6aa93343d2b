//! Resource sampling and threshold evaluation.
//!
//! The sampler reads CPU, memory, disk and the busiest processes through a
//! `MetricSource`; the evaluator turns a snapshot into alerts.

pub mod alerts;
mod metrics;
mod sampler;
mod source;

pub use alerts::{evaluate_alerts, Alert, AlertSeverity, CRITICAL_PERCENT};
pub use metrics::{GapSource, Metric, ProcessInfo, ResourceSnapshot, SamplingGap};
pub use sampler::{rank_top_processes, ResourceSampler};
pub use source::MetricSource;
