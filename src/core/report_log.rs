//! Append-only report log.
//!
//! Reports are written whole: the caller renders the full text first and
//! `append` hands it to a single `write_all` on a file opened in append mode.
//! Existing content is never truncated or rotated.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PulseError, Result};

pub struct ReportLog {
    path: PathBuf,
    file: File,
}

impl ReportLog {
    /// Open (creating if needed) for appending. Failing here is a startup
    /// configuration problem.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                PulseError::config(format!("cannot open log file {}: {}", path.display(), e))
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one rendered report followed by a blank separator line.
    pub fn append(&mut self, report: &str) -> Result<()> {
        let mut entry = String::with_capacity(report.len() + 2);
        entry.push_str(report);
        if !entry.ends_with('\n') {
            entry.push('\n');
        }
        entry.push('\n');

        self.file
            .write_all(entry.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|e| {
                PulseError::report_log(format!("write to {} failed: {}", self.path.display(), e))
            })
    }
}
