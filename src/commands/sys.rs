//! `pulsecheck sys`: CPU, memory, disk and process health.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::Write;
use std::path::PathBuf;

use super::common;
use crate::core::config::DEFAULT_TOP_PROCESSES;
use crate::core::system_monitor::{evaluate_alerts, ResourceSampler};
use crate::core::{RunMode, RunSummary, Scheduler, SystemSettings, Thresholds};
use crate::platform::{default_disk_path, get_metric_source};
use crate::ui::{self, Reporter};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let settings = settings_from_matches(matches)?;
    settings.validate().context("Invalid arguments")?;

    let log = common::open_log(settings.log_path.as_ref())?;
    let mut reporter = Reporter::stdout(log, settings.json);
    let mut scheduler = Scheduler::new(settings.mode);

    if settings.mode.is_continuous() {
        common::install_interrupt_handler(scheduler.cancel_flag())?;
        if !settings.json {
            print_banner(&settings);
        }
    }

    let mut sampler = ResourceSampler::new(get_metric_source(), &settings);
    let summary = run(&settings, &mut sampler, &mut reporter, &mut scheduler)?;
    common::print_stop_notice(&summary, settings.json);
    Ok(())
}

/// sample -> evaluate -> report, once per cycle
pub fn run<W: Write>(
    settings: &SystemSettings,
    sampler: &mut ResourceSampler,
    reporter: &mut Reporter<W>,
    scheduler: &mut Scheduler,
) -> Result<RunSummary> {
    let summary = scheduler.run(|_cycle| {
        let snapshot = sampler.sample();
        let alerts = evaluate_alerts(&snapshot, &settings.thresholds);
        reporter.report_system(&snapshot, &alerts)
    })?;
    Ok(summary)
}

pub fn settings_from_matches(matches: &ArgMatches) -> Result<SystemSettings> {
    let thresholds = match matches.get_one::<String>("thresholds") {
        Some(raw) => raw
            .parse::<Thresholds>()
            .with_context(|| format!("Invalid --thresholds '{}'", raw))?,
        None => Thresholds::default(),
    };

    Ok(SystemSettings {
        thresholds,
        top_processes: matches
            .get_one::<u64>("top")
            .map(|&n| n as usize)
            .unwrap_or(DEFAULT_TOP_PROCESSES),
        disk_path: matches
            .get_one::<PathBuf>("disk")
            .cloned()
            .unwrap_or_else(default_disk_path),
        mode: common::run_mode(matches),
        log_path: common::log_path(matches),
        json: matches.get_flag("json"),
    })
}

fn print_banner(settings: &SystemSettings) {
    ui::info("Starting continuous system health monitoring");
    if let RunMode::Continuous { interval, .. } = settings.mode {
        ui::dimmed(&format!("Check interval: {} seconds", interval.as_secs()));
    }
    ui::dimmed(&format!("Thresholds: {}", settings.thresholds));
    if let Some(path) = &settings.log_path {
        ui::dimmed(&format!("Logging to: {}", path.display()));
    }
    ui::dimmed("Press Ctrl+C to stop");
    println!();
}
