use pulsecheck::core::system_monitor::{
    evaluate_alerts, AlertSeverity, GapSource, Metric, ProcessInfo, ResourceSampler,
};
use pulsecheck::core::{SystemSettings, Thresholds};
use pulsecheck::ui::{render_system_report, Palette};

use super::support::ScriptedSource;

fn process(pid: u32, cpu: f32) -> ProcessInfo {
    ProcessInfo {
        pid,
        cpu_percent: cpu,
        memory_percent: 0.5,
        user: "app".to_string(),
        command: format!("worker-{}", pid),
    }
}

#[test]
fn test_memory_breach_yields_single_alert() {
    let settings = SystemSettings::default();
    let source = ScriptedSource {
        cpu: Some(10.9),
        memory: Some(99.7),
        disk: Some(25.0),
        processes: Some(Vec::new()),
    };
    let mut sampler = ResourceSampler::new(Box::new(source), &settings);

    let snapshot = sampler.sample();
    let alerts = evaluate_alerts(&snapshot, &settings.thresholds);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].metric, Metric::Memory);
    assert_eq!(alerts[0].value, 99.7);
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
}

#[test]
fn test_custom_thresholds_change_alert_set() {
    let settings = SystemSettings {
        thresholds: "cpu=5,memory=100".parse::<Thresholds>().unwrap(),
        ..Default::default()
    };
    let source = ScriptedSource {
        cpu: Some(10.9),
        memory: Some(99.7),
        disk: Some(85.0),
        processes: Some(Vec::new()),
    };
    let mut sampler = ResourceSampler::new(Box::new(source), &settings);

    let snapshot = sampler.sample();
    let metrics: Vec<Metric> = evaluate_alerts(&snapshot, &settings.thresholds)
        .iter()
        .map(|a| a.metric)
        .collect();
    assert_eq!(metrics, vec![Metric::Cpu, Metric::Disk]);
}

#[test]
fn test_unavailable_metrics_are_reported_not_alerted() {
    let settings = SystemSettings {
        thresholds: Thresholds { cpu: 0, memory: 0, disk: 0 },
        ..Default::default()
    };
    let source = ScriptedSource {
        cpu: None,
        memory: Some(50.0),
        disk: None,
        processes: None,
    };
    let mut sampler = ResourceSampler::new(Box::new(source), &settings);

    let snapshot = sampler.sample();
    let alerts = evaluate_alerts(&snapshot, &settings.thresholds);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].metric, Metric::Memory);

    let gaps: Vec<GapSource> = snapshot.gaps.iter().map(|g| g.source).collect();
    assert_eq!(
        gaps,
        vec![
            GapSource::Metric(Metric::Cpu),
            GapSource::Metric(Metric::Disk),
            GapSource::Processes
        ]
    );

    let report = render_system_report(&snapshot, &alerts, Palette::Plain);
    assert!(report.contains("  CPU Usage:    unavailable"));
    assert!(report.contains("  - Process list: ps: permission denied"));
    assert!(report.contains("SUMMARY: 1 alert(s) | 1 metric(s) sampled | 2 unavailable"));
}

#[test]
fn test_top_processes_keep_tie_order() {
    let settings = SystemSettings {
        top_processes: 2,
        ..Default::default()
    };
    let source = ScriptedSource {
        cpu: Some(1.0),
        memory: Some(1.0),
        disk: Some(1.0),
        processes: Some(vec![
            process(10, 5.0),
            process(11, 90.0),
            process(12, 90.0),
            process(13, 1.0),
        ]),
    };
    let mut sampler = ResourceSampler::new(Box::new(source), &settings);

    let snapshot = sampler.sample();
    let pids: Vec<u32> = snapshot.top_processes.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![11, 12]);

    let report = render_system_report(&snapshot, &[], Palette::Plain);
    assert!(report.contains("worker-11"));
    assert!(!report.contains("worker-10"));
    assert!(!report.contains("worker-13"));
}

#[test]
fn test_evaluation_is_repeatable() {
    let settings = SystemSettings::default();
    let source = ScriptedSource {
        cpu: Some(81.0),
        memory: Some(20.0),
        disk: Some(20.0),
        processes: Some(Vec::new()),
    };
    let mut sampler = ResourceSampler::new(Box::new(source), &settings);

    let first = evaluate_alerts(&sampler.sample(), &settings.thresholds);
    let second = evaluate_alerts(&sampler.sample(), &settings.thresholds);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}
