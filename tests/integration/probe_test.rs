use pulsecheck::core::probe::{ProbeFailure, ProbeState, Prober};
use pulsecheck::core::{ProbeSettings, Target};
use pulsecheck::ui::{probe_summary, render_probe_report, Palette};
use std::time::Duration;

use super::support::{redirect_response, refused_url, serve, serve_silently, status_response};

fn prober(timeout: Duration) -> Prober {
    let settings = ProbeSettings {
        timeout,
        use_proxy: false,
        ..Default::default()
    };
    Prober::new(&settings).unwrap()
}

#[test]
fn test_up_and_refused_targets_in_one_batch() {
    let ok = serve(vec![status_response(200, "OK")]);
    let broken = refused_url();
    let targets = vec![Target::new(ok.clone()), Target::new(broken.clone())];

    let results = prober(Duration::from_secs(5)).probe_all(&targets);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].target.as_str(), ok);
    assert_eq!(results[0].state, ProbeState::Up);
    assert_eq!(results[0].status_code, Some(200));
    assert_eq!(results[1].target.as_str(), broken);
    assert_eq!(results[1].state, ProbeState::Down);
    assert_eq!(results[1].failure, Some(ProbeFailure::Error));
    assert_eq!(results[1].message, "ERROR");

    assert_eq!(probe_summary(&results), "1 UP | 1 DOWN | Total: 2");
    let report = render_probe_report(&results, &chrono::Local::now(), Palette::Plain);
    assert!(report.contains("SUMMARY: 1 UP | 1 DOWN | Total: 2"));
    assert!(report.contains("    HTTP Code: ERROR"));
}

#[test]
fn test_server_error_is_down() {
    let url = serve(vec![status_response(503, "Service Unavailable")]);
    let result = prober(Duration::from_secs(5)).probe(&Target::new(url));

    assert_eq!(result.state, ProbeState::Down);
    assert_eq!(result.status_code, Some(503));
    assert_eq!(result.message, "Server error (HTTP 503)");
}

#[test]
fn test_client_error_is_down() {
    let url = serve(vec![status_response(404, "Not Found")]);
    let result = prober(Duration::from_secs(5)).probe(&Target::new(url));

    assert_eq!(result.state, ProbeState::Down);
    assert_eq!(result.message, "Client error (HTTP 404)");
}

#[test]
fn test_redirect_is_followed() {
    let url = serve(vec![redirect_response("/healthy"), status_response(200, "OK")]);
    let result = prober(Duration::from_secs(5)).probe(&Target::new(url));

    assert_eq!(result.state, ProbeState::Up);
    assert_eq!(result.status_code, Some(200));
}

#[test]
fn test_silent_server_times_out() {
    let url = serve_silently(Duration::from_secs(5));
    let result = prober(Duration::from_secs(1)).probe(&Target::new(url));

    assert_eq!(result.state, ProbeState::Down);
    assert_eq!(result.failure, Some(ProbeFailure::Timeout));
    assert_eq!(result.message, "TIMEOUT");
    assert_eq!(result.code_label(), "TIMEOUT");
}

#[test]
fn test_unreachable_target_is_down_every_time() {
    let url = refused_url();
    let prober = prober(Duration::from_secs(2));
    let target = Target::new(url);

    let first = prober.probe(&target);
    let second = prober.probe(&target);
    assert_eq!(first.state, ProbeState::Down);
    assert_eq!(second.state, ProbeState::Down);
    assert_eq!(first.failure, second.failure);
}

#[test]
fn test_malformed_target_is_error_not_panic() {
    let result = prober(Duration::from_secs(1)).probe(&Target::new("http://[::1"));
    assert_eq!(result.state, ProbeState::Down);
    assert_eq!(result.failure, Some(ProbeFailure::Error));
}

#[test]
fn test_bare_host_is_probed_over_http() {
    let url = serve(vec![status_response(200, "OK")]);
    let bare = url.trim_start_matches("http://").to_string();
    let result = prober(Duration::from_secs(5)).probe(&Target::new(bare.clone()));

    assert_eq!(result.state, ProbeState::Up);
    assert_eq!(result.target.as_str(), bare);
}
