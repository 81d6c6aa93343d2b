// Shared helpers: a one-shot HTTP stub and a scripted metric source

use pulsecheck::core::system_monitor::{MetricSource, ProcessInfo};
use pulsecheck::{PulseError, Result};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::thread;
use std::time::Duration;

fn read_request(stream: &TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
        if line == "\r\n" || line == "\n" {
            break;
        }
        line.clear();
    }
}

/// Serve `responses` in order, one per connection, then stop.
/// Returns the base URL (`http://127.0.0.1:port`).
pub fn serve(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            read_request(&stream);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{}", addr)
}

pub fn status_response(code: u16, reason: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        code, reason
    )
}

pub fn redirect_response(location: &str) -> String {
    format!(
        "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        location
    )
}

/// Accept a connection and never answer.
pub fn serve_silently(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });

    format!("http://{}", addr)
}

/// URL of a local port with nothing listening
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Metric source that replays fixed readings; `None` means unreadable.
pub struct ScriptedSource {
    pub cpu: Option<f32>,
    pub memory: Option<f32>,
    pub disk: Option<f32>,
    pub processes: Option<Vec<ProcessInfo>>,
}

fn unreadable<T>(what: &str) -> Result<T> {
    Err(PulseError::metric_unavailable(format!("{}: permission denied", what)))
}

impl MetricSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn cpu_percent(&mut self) -> Result<f32> {
        self.cpu.map_or_else(|| unreadable("cpu"), Ok)
    }

    fn memory_percent(&mut self) -> Result<f32> {
        self.memory.map_or_else(|| unreadable("memory"), Ok)
    }

    fn disk_percent(&mut self, _path: &Path) -> Result<f32> {
        self.disk.map_or_else(|| unreadable("disk"), Ok)
    }

    fn processes(&mut self) -> Result<Vec<ProcessInfo>> {
        self.processes.clone().map_or_else(|| unreadable("ps"), Ok)
    }
}
