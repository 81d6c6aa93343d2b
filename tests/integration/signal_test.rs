#![cfg(unix)]

use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_sigterm_stops_continuous_run_cleanly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("system_health.log");

    let mut child = Command::new(env!("CARGO_BIN_EXE_pulsecheck"))
        .args(["sys", "--continuous", "--interval", "1", "--log"])
        .arg(&path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(2500));
    let sent = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    let status = child.wait().unwrap();
    assert!(status.success(), "unexpected exit: {:?}", status);

    let contents = std::fs::read_to_string(&path).unwrap();
    let reports = contents.matches("SYSTEM HEALTH MONITORING REPORT").count();
    assert!(reports >= 1);
    assert_eq!(contents.matches("SUMMARY:").count(), reports);
    assert!(contents.ends_with(&format!("{}\n\n", "=".repeat(70))));
}
