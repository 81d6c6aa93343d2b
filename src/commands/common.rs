//! Argument handling shared by the `app` and `sys` commands.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::DEFAULT_INTERVAL_SECS;
use crate::core::{ReportLog, RunMode, RunSummary, StopReason};
use crate::ui;

pub fn run_mode(matches: &ArgMatches) -> RunMode {
    if !matches.get_flag("continuous") {
        return RunMode::SingleShot;
    }

    let interval = matches
        .get_one::<u64>("interval")
        .copied()
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    let max_cycles = matches.get_one::<u64>("count").copied();

    RunMode::continuous(Duration::from_secs(interval), max_cycles)
}

pub fn log_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("log").cloned()
}

pub fn open_log(path: Option<&PathBuf>) -> Result<Option<ReportLog>> {
    path.map(|p| ReportLog::open(p))
        .transpose()
        .context("Invalid --log destination")
}

/// Route Ctrl+C, SIGTERM and SIGHUP to the scheduler's cancel flag. The
/// running cycle finishes and its report is written before the loop exits.
pub fn install_interrupt_handler(cancel_flag: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!(
            "{}",
            "Stopping after the current check...".yellow().bold()
        );
        cancel_flag.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set interrupt handler: {}", e))
}

pub fn print_stop_notice(summary: &RunSummary, quiet: bool) {
    if quiet {
        return;
    }
    if summary.stop_reason == StopReason::Interrupted {
        ui::info(&format!(
            "Monitoring stopped after {} check(s).",
            summary.cycles
        ));
    }
}
