//! Delivers rendered reports to the console and the optional report log.
//!
//! Every report is rendered in full before anything is written, and each
//! destination gets it in one write, so an interrupt can never leave half a
//! report behind.

use chrono::{DateTime, Local};
use std::io::{self, Stdout, Write};

use super::json;
use super::report::{render_probe_report, render_system_report, Palette};
use crate::core::probe::ProbeResult;
use crate::core::report_log::ReportLog;
use crate::core::system_monitor::{Alert, ResourceSnapshot};
use crate::error::Result;

pub struct Reporter<W: Write = Stdout> {
    console: W,
    palette: Palette,
    json: bool,
    log: Option<ReportLog>,
}

impl Reporter<Stdout> {
    /// Reporter writing colored text (or JSON) to stdout
    pub fn stdout(log: Option<ReportLog>, json: bool) -> Self {
        Self::with_console(io::stdout(), Palette::Color, log, json)
    }
}

impl<W: Write> Reporter<W> {
    pub fn with_console(console: W, palette: Palette, log: Option<ReportLog>, json: bool) -> Self {
        Self {
            console,
            palette,
            json,
            log,
        }
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn report_probes(
        &mut self,
        results: &[ProbeResult],
        generated_at: &DateTime<Local>,
    ) -> Result<()> {
        let console = if self.json {
            json::probe_json(results)?
        } else {
            render_probe_report(results, generated_at, self.palette)
        };
        let plain = self
            .log
            .as_ref()
            .map(|_| render_probe_report(results, generated_at, Palette::Plain));

        self.emit(&console, plain.as_deref())
    }

    pub fn report_system(&mut self, snapshot: &ResourceSnapshot, alerts: &[Alert]) -> Result<()> {
        let console = if self.json {
            json::system_json(snapshot, alerts)?
        } else {
            render_system_report(snapshot, alerts, self.palette)
        };
        let plain = self
            .log
            .as_ref()
            .map(|_| render_system_report(snapshot, alerts, Palette::Plain));

        self.emit(&console, plain.as_deref())
    }

    fn emit(&mut self, console: &str, plain: Option<&str>) -> Result<()> {
        let mut text = String::with_capacity(console.len() + 2);
        text.push_str(console);
        text.push('\n');
        if !self.json {
            text.push('\n');
        }
        // Like the log, a broken console (closed pipe) does not stop monitoring.
        let written = self.console.write_all(text.as_bytes());
        if let Err(e) = written.and_then(|()| self.console.flush()) {
            log::error!("console write failed: {}", e);
        }

        if let (Some(log), Some(plain)) = (self.log.as_mut(), plain) {
            // A failed log write is reported but does not stop monitoring.
            match log.append(plain) {
                Ok(()) => log::debug!("report appended to {}", log.path().display()),
                Err(e) => {
                    log::error!("{}", e);
                    super::messages::error(&format!("Error writing to log file: {}", e));
                }
            }
        }

        Ok(())
    }
}
