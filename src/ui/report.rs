//! Report rendering.
//!
//! Pure functions from already computed results to text. The same function
//! renders the console copy (`Palette::Color`) and the log copy
//! (`Palette::Plain`), so both carry identical content.

use chrono::{DateTime, Local};
use colored::Colorize;

use crate::core::probe::{ProbeResult, ProbeState};
use crate::core::system_monitor::{
    Alert, AlertSeverity, GapSource, Metric, ProcessInfo, ResourceSnapshot,
};

const RULE_WIDTH: usize = 70;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const PROBE_REPORT_TITLE: &str = "APPLICATION HEALTH CHECK REPORT";
pub const SYSTEM_REPORT_TITLE: &str = "SYSTEM HEALTH MONITORING REPORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Color,
    Plain,
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Bad,
    Warn,
    Heading,
}

impl Palette {
    fn paint(self, text: &str, tone: Tone) -> String {
        match self {
            Palette::Plain => text.to_string(),
            Palette::Color => match tone {
                Tone::Good => text.green().to_string(),
                Tone::Bad => text.red().to_string(),
                Tone::Warn => text.yellow().to_string(),
                Tone::Heading => text.bold().to_string(),
            },
        }
    }
}

pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn push_header(out: &mut Vec<String>, title: &str, timestamp: &DateTime<Local>, palette: Palette) {
    out.push(rule());
    out.push(palette.paint(title, Tone::Heading));
    out.push(format!("Timestamp: {}", format_timestamp(timestamp)));
    out.push(rule());
    out.push(String::new());
}

fn push_summary(out: &mut Vec<String>, summary: &str) {
    out.push(rule());
    out.push(format!("SUMMARY: {}", summary));
    out.push(rule());
}

fn state_tone(state: ProbeState) -> Tone {
    match state {
        ProbeState::Up => Tone::Good,
        ProbeState::Down => Tone::Bad,
        ProbeState::Unknown => Tone::Warn,
    }
}

fn state_symbol(state: ProbeState) -> &'static str {
    match state {
        ProbeState::Up => "✓",
        ProbeState::Down => "✗",
        ProbeState::Unknown => "?",
    }
}

/// Block for a single probe result, without surrounding header or summary
pub fn render_probe_result(result: &ProbeResult, palette: Palette) -> String {
    let tone = state_tone(result.state);
    let mut lines = vec![
        palette.paint(
            &format!("[{}] {}", state_symbol(result.state), result.target),
            tone,
        ),
        format!("    Status: {}", palette.paint(result.state.as_str(), tone)),
        format!("    HTTP Code: {}", result.code_label()),
        format!("    Message: {}", result.message),
    ];
    if let Some(detail) = &result.detail {
        lines.push(format!("    Detail: {}", detail));
    }
    lines.push(format!("    Checked at: {}", format_timestamp(&result.timestamp)));
    lines.join("\n")
}

/// `N UP | M DOWN | Total: T`, with the UNKNOWN count only when non-zero
pub fn probe_summary(results: &[ProbeResult]) -> String {
    let count = |state: ProbeState| results.iter().filter(|r| r.state == state).count();
    let unknown = count(ProbeState::Unknown);

    let mut summary = format!("{} UP | {} DOWN", count(ProbeState::Up), count(ProbeState::Down));
    if unknown > 0 {
        summary.push_str(&format!(" | {} UNKNOWN", unknown));
    }
    summary.push_str(&format!(" | Total: {}", results.len()));
    summary
}

pub fn render_probe_report(
    results: &[ProbeResult],
    generated_at: &DateTime<Local>,
    palette: Palette,
) -> String {
    let mut out = Vec::new();
    push_header(&mut out, PROBE_REPORT_TITLE, generated_at, palette);

    for result in results {
        out.push(render_probe_result(result, palette));
        out.push(String::new());
    }

    push_summary(&mut out, &probe_summary(results));
    out.join("\n")
}

fn format_percent(value: Option<f32>) -> String {
    value.map_or_else(|| "unavailable".to_string(), |v| format!("{:.1}%", v))
}

fn process_row(process: &ProcessInfo) -> String {
    format!(
        "  {:<8} {:<6.1} {:<6.1} {:<10} {}",
        process.pid, process.cpu_percent, process.memory_percent, process.user, process.command
    )
}

fn alert_line(alert: &Alert, palette: Palette) -> String {
    let (label, tone) = match alert.severity {
        AlertSeverity::Critical => ("CRITICAL", Tone::Bad),
        AlertSeverity::Warning => ("WARNING", Tone::Warn),
    };
    palette.paint(&format!("  ✗ [{}] {}", label, alert.message()), tone)
}

/// `A alert(s) | S metric(s) sampled | U unavailable`
pub fn system_summary(snapshot: &ResourceSnapshot, alerts: &[Alert]) -> String {
    let sampled = snapshot.sampled_count();
    format!(
        "{} alert(s) | {} metric(s) sampled | {} unavailable",
        alerts.len(),
        sampled,
        Metric::ALL.len() - sampled
    )
}

pub fn render_system_report(
    snapshot: &ResourceSnapshot,
    alerts: &[Alert],
    palette: Palette,
) -> String {
    let mut out = Vec::new();
    push_header(&mut out, SYSTEM_REPORT_TITLE, &snapshot.timestamp, palette);

    out.push("SYSTEM METRICS:".to_string());
    out.push(format!("  CPU Usage:    {}", format_percent(snapshot.cpu_percent)));
    out.push(format!("  Memory Usage: {}", format_percent(snapshot.memory_percent)));
    out.push(format!("  Disk Usage:   {}", format_percent(snapshot.disk_percent)));
    out.push(String::new());

    if !snapshot.top_processes.is_empty() {
        out.push("TOP CPU-CONSUMING PROCESSES:".to_string());
        out.push(format!(
            "  {:<8} {:<6} {:<6} {:<10} {}",
            "PID", "CPU%", "MEM%", "USER", "COMMAND"
        ));
        out.push(format!("  {}", "-".repeat(60)));
        out.extend(snapshot.top_processes.iter().map(process_row));
        out.push(String::new());
    }

    if !snapshot.gaps.is_empty() {
        out.push("SAMPLING GAPS:".to_string());
        for gap in &snapshot.gaps {
            let line = match gap.source {
                GapSource::Metric(_) => format!("  - {} usage: {}", gap.source, gap.reason),
                GapSource::Processes => format!("  - {}: {}", gap.source, gap.reason),
            };
            out.push(palette.paint(&line, Tone::Warn));
        }
        out.push(String::new());
    }

    if alerts.is_empty() {
        out.push(palette.paint("✓ No alerts - all metrics within thresholds", Tone::Good));
    } else {
        out.push(palette.paint("⚠ ALERTS:", Tone::Bad));
        out.extend(alerts.iter().map(|alert| alert_line(alert, palette)));
    }
    out.push(String::new());

    push_summary(&mut out, &system_summary(snapshot, alerts));
    out.join("\n")
}
