//! `pulsecheck app`: HTTP(S) reachability checks.

use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use super::common;
use crate::core::config::{load_targets, DEFAULT_TIMEOUT_SECS};
use crate::core::{ProbeSettings, Prober, RunSummary, Scheduler, Target};
use crate::ui::{self, Reporter};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let settings = settings_from_matches(matches)?;
    settings.validate().context("Invalid arguments")?;

    let log = common::open_log(settings.log_path.as_ref())?;
    let prober = Prober::new(&settings).context("Failed to build HTTP client")?;
    let mut reporter = Reporter::stdout(log, settings.json);
    let mut scheduler = Scheduler::new(settings.mode);

    if settings.mode.is_continuous() {
        common::install_interrupt_handler(scheduler.cancel_flag())?;
        if !settings.json {
            print_banner(&settings);
        }
    }

    let summary = run(&settings, &prober, &mut reporter, &mut scheduler)?;
    common::print_stop_notice(&summary, settings.json);
    Ok(())
}

/// Probe every target once per cycle and report. Individual target failures
/// are part of the report, never an `Err`.
pub fn run<W: Write>(
    settings: &ProbeSettings,
    prober: &Prober,
    reporter: &mut Reporter<W>,
    scheduler: &mut Scheduler,
) -> Result<RunSummary> {
    let summary = scheduler.run(|_cycle| {
        let results = prober.probe_all(&settings.targets);
        reporter.report_probes(&results, &Local::now())
    })?;
    Ok(summary)
}

pub fn settings_from_matches(matches: &ArgMatches) -> Result<ProbeSettings> {
    let targets = match matches.get_one::<PathBuf>("file") {
        Some(path) => load_targets(path)?,
        None => matches
            .get_many::<String>("urls")
            .map(|urls| urls.map(Target::new).collect())
            .unwrap_or_default(),
    };

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ProbeSettings {
        targets,
        timeout: Duration::from_secs(timeout),
        accept_invalid_certs: matches.get_flag("insecure"),
        use_proxy: !matches.get_flag("no-proxy"),
        mode: common::run_mode(matches),
        log_path: common::log_path(matches),
        json: matches.get_flag("json"),
    })
}

fn print_banner(settings: &ProbeSettings) {
    if let (Some(target), crate::core::RunMode::Continuous { interval, .. }) =
        (settings.targets.first(), settings.mode)
    {
        ui::info(&format!("Starting continuous monitoring of {}", target));
        ui::dimmed(&format!("Check interval: {} seconds", interval.as_secs()));
    }
    if let Some(path) = &settings.log_path {
        ui::dimmed(&format!("Logging to: {}", path.display()));
    }
    if settings.accept_invalid_certs {
        ui::warn("TLS certificate validation is disabled (--insecure)");
    }
    ui::dimmed("Press Ctrl+C to stop");
    println!();
}
