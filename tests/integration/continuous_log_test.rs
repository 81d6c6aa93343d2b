use pulsecheck::commands;
use pulsecheck::core::system_monitor::ResourceSampler;
use pulsecheck::core::{
    ProbeSettings, Prober, ReportLog, RunMode, Scheduler, StopReason, SystemSettings, Target,
};
use pulsecheck::ui::{Palette, Reporter};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

use super::support::{serve, status_response, ScriptedSource};

fn count_reports(log: &str, title: &str) -> usize {
    log.matches(title).count()
}

#[test]
fn test_interrupted_continuous_run_leaves_whole_reports() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("system_health.log");

    let settings = SystemSettings {
        mode: RunMode::continuous(Duration::from_secs(1), None),
        log_path: Some(path.clone()),
        ..Default::default()
    };
    let source = ScriptedSource {
        cpu: Some(10.9),
        memory: Some(99.7),
        disk: Some(25.0),
        processes: Some(Vec::new()),
    };
    let mut sampler = ResourceSampler::new(Box::new(source), &settings);
    let log = ReportLog::open(&path).unwrap();
    let mut reporter = Reporter::with_console(Vec::new(), Palette::Plain, Some(log), false);
    let mut scheduler = Scheduler::new(settings.mode);

    // Cycles run at t=0s and t=1s; the interrupt lands during the second sleep.
    let flag = scheduler.cancel_flag();
    let interrupter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(1500));
        flag.store(true, Ordering::Relaxed);
    });

    let summary =
        commands::sys::run(&settings, &mut sampler, &mut reporter, &mut scheduler).unwrap();
    interrupter.join().unwrap();

    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.stop_reason, StopReason::Interrupted);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(count_reports(&contents, "SYSTEM HEALTH MONITORING REPORT"), 2);
    let summary_line = "SUMMARY: 1 alert(s) | 3 metric(s) sampled | 0 unavailable";
    assert_eq!(contents.matches(summary_line).count(), 2);
    assert!(contents.ends_with(&format!("{}\n\n", "=".repeat(70))));
}

#[test]
fn test_log_is_appended_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("health.log");

    for _ in 0..2 {
        let settings = SystemSettings {
            log_path: Some(path.clone()),
            ..Default::default()
        };
        let source = ScriptedSource {
            cpu: Some(1.0),
            memory: None,
            disk: Some(2.0),
            processes: None,
        };
        let mut sampler = ResourceSampler::new(Box::new(source), &settings);
        let log = ReportLog::open(&path).unwrap();
        let mut reporter = Reporter::with_console(Vec::new(), Palette::Plain, Some(log), false);
        let mut scheduler = Scheduler::new(settings.mode);

        commands::sys::run(&settings, &mut sampler, &mut reporter, &mut scheduler).unwrap();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(count_reports(&contents, "SYSTEM HEALTH MONITORING REPORT"), 2);
    assert_eq!(contents.matches("  Memory Usage: unavailable").count(), 2);
}

#[test]
fn test_continuous_probe_with_cycle_budget() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app_health.log");
    let url = serve(vec![status_response(200, "OK"), status_response(500, "Oops")]);

    let settings = ProbeSettings {
        targets: vec![Target::new(url)],
        use_proxy: false,
        mode: RunMode::continuous(Duration::from_secs(1), Some(2)),
        log_path: Some(path.clone()),
        ..Default::default()
    };
    settings.validate().unwrap();

    let prober = Prober::new(&settings).unwrap();
    let log = ReportLog::open(&path).unwrap();
    let mut reporter = Reporter::with_console(Vec::new(), Palette::Plain, Some(log), false);
    let mut scheduler = Scheduler::new(settings.mode);

    let summary = commands::app::run(&settings, &prober, &mut reporter, &mut scheduler).unwrap();
    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.stop_reason, StopReason::Completed);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(count_reports(&contents, "APPLICATION HEALTH CHECK REPORT"), 2);
    assert!(contents.contains("SUMMARY: 1 UP | 0 DOWN | Total: 1"));
    assert!(contents.contains("SUMMARY: 0 UP | 1 DOWN | Total: 1"));

    let console = String::from_utf8(reporter.console().clone()).unwrap();
    assert_eq!(console, contents);
}
