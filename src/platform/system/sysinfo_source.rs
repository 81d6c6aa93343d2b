use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System, UpdateKind, Users,
};

use crate::core::system_monitor::{MetricSource, ProcessInfo};
use crate::error::{PulseError, Result};

/// `MetricSource` backed by sysinfo, which wraps the native API of each OS
/// (procfs on Linux, host_statistics/libproc on macOS, PDH/ToolHelp on Windows).
pub struct SysinfoSource {
    system: System,
    disks: Disks,
    users: Users,
    primed_at: Instant,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::everything())
            .with_processes(Self::process_refresh_kind());

        // The first CPU reading is a baseline; usage needs a second refresh.
        let system = System::new_with_specifics(refresh_kind);

        Self {
            system,
            disks: Disks::new_with_refreshed_list(),
            users: Users::new_with_refreshed_list(),
            primed_at: Instant::now(),
        }
    }

    fn process_refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::nothing()
            .with_cpu()
            .with_memory()
            .with_user(UpdateKind::OnlyIfNotSet)
    }

    fn user_name(&self, process: &sysinfo::Process) -> String {
        process
            .user_id()
            .and_then(|uid| self.users.get_user_by_id(uid))
            .map(|user| user.name().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SysinfoSource {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn refresh(&mut self) -> Result<()> {
        let since_baseline = self.primed_at.elapsed();
        if since_baseline < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
            thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL - since_baseline);
        }

        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            Self::process_refresh_kind(),
        );
        self.disks.refresh(true);
        self.primed_at = Instant::now();
        Ok(())
    }

    fn cpu_percent(&mut self) -> Result<f32> {
        if self.system.cpus().is_empty() {
            return Err(PulseError::metric_unavailable("no CPUs reported by the host"));
        }
        Ok(self.system.global_cpu_usage())
    }

    fn memory_percent(&mut self) -> Result<f32> {
        let total = self.system.total_memory();
        if total == 0 {
            return Err(PulseError::metric_unavailable("total memory reported as 0"));
        }
        let used = self.system.used_memory();
        Ok((used as f64 / total as f64 * 100.0) as f32)
    }

    fn disk_percent(&mut self, path: &Path) -> Result<f32> {
        let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let mounts: Vec<PathBuf> = self
            .disks
            .list()
            .iter()
            .map(|disk| disk.mount_point().to_path_buf())
            .collect();

        let index = best_mount(&path, &mounts).ok_or_else(|| {
            PulseError::metric_unavailable(format!(
                "no mounted filesystem holds {}",
                path.display()
            ))
        })?;

        let disk = &self.disks.list()[index];
        let total = disk.total_space();
        if total == 0 {
            return Err(PulseError::metric_unavailable(format!(
                "{} reports zero capacity",
                disk.mount_point().display()
            )));
        }
        let used = total.saturating_sub(disk.available_space());
        Ok((used as f64 / total as f64 * 100.0) as f32)
    }

    fn processes(&mut self) -> Result<Vec<ProcessInfo>> {
        let total_memory = self.system.total_memory();

        let mut processes: Vec<ProcessInfo> = self
            .system
            .processes()
            .values()
            .map(|process| ProcessInfo {
                pid: process.pid().as_u32(),
                cpu_percent: process.cpu_usage(),
                memory_percent: if total_memory > 0 {
                    (process.memory() as f64 / total_memory as f64 * 100.0) as f32
                } else {
                    0.0
                },
                user: self.user_name(process),
                command: process.name().to_string_lossy().to_string(),
            })
            .collect();

        if processes.is_empty() {
            return Err(PulseError::metric_unavailable("process table is empty or unreadable"));
        }

        // sysinfo hands processes back in hash order; PID order stands in for
        // the process table order.
        processes.sort_by_key(|p| p.pid);
        Ok(processes)
    }
}

/// Index of the mount point that is the longest ancestor of `path`
fn best_mount(path: &Path, mounts: &[PathBuf]) -> Option<usize> {
    mounts
        .iter()
        .enumerate()
        .filter(|(_, mount)| path.starts_with(mount))
        .max_by_key(|(_, mount)| mount.components().count())
        .map(|(index, _)| index)
}
