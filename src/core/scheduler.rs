//! Single-threaded cycle runner.
//!
//! A run is either one cycle or a loop of `cycle -> sleep(interval)` that ends
//! when the cancellation flag is raised (Ctrl+C) or an optional cycle budget
//! is spent. Each cycle runs to completion before the flag is looked at, so a
//! report is never cut in half by an interrupt.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{PulseError, Result};

/// Upper bound on how long an interrupt can go unnoticed while sleeping.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    SingleShot,
    Continuous {
        interval: Duration,
        max_cycles: Option<u64>,
    },
}

impl RunMode {
    pub fn continuous(interval: Duration, max_cycles: Option<u64>) -> Self {
        RunMode::Continuous {
            interval,
            max_cycles,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, RunMode::Continuous { .. })
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            RunMode::SingleShot => Ok(()),
            RunMode::Continuous { interval, .. } if interval.is_zero() => {
                Err(PulseError::config("interval must be at least one second"))
            }
            RunMode::Continuous {
                max_cycles: Some(0),
                ..
            } => Err(PulseError::config("--count must be at least 1")),
            RunMode::Continuous { .. } => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Completed,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub stop_reason: StopReason,
}

pub struct Scheduler {
    mode: RunMode,
    state: SchedulerState,
    cancel_flag: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            state: SchedulerState::Idle,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag; storing `true` stops the loop after the current cycle.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel_flag.clone()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Drive `cycle` according to the run mode. The closure receives the
    /// 1-based cycle number. An `Err` from a cycle aborts the run.
    pub fn run<F>(&mut self, mut cycle: F) -> Result<RunSummary>
    where
        F: FnMut(u64) -> Result<()>,
    {
        self.state = SchedulerState::Running;
        let result = self.run_cycles(&mut cycle);
        self.state = SchedulerState::Stopped;
        result
    }

    fn run_cycles<F>(&self, cycle: &mut F) -> Result<RunSummary>
    where
        F: FnMut(u64) -> Result<()>,
    {
        let (interval, max_cycles) = match self.mode {
            RunMode::SingleShot => {
                cycle(1)?;
                return Ok(RunSummary {
                    cycles: 1,
                    stop_reason: StopReason::Completed,
                });
            }
            RunMode::Continuous {
                interval,
                max_cycles,
            } => (interval, max_cycles),
        };

        let mut completed = 0;
        loop {
            if self.is_cancelled() {
                return Ok(self.summary(completed, StopReason::Interrupted));
            }

            completed += 1;
            cycle(completed)?;
            log::debug!("cycle {} finished", completed);

            if max_cycles.is_some_and(|max| completed >= max) {
                return Ok(self.summary(completed, StopReason::Completed));
            }

            if !self.sleep_unless_cancelled(interval) {
                return Ok(self.summary(completed, StopReason::Interrupted));
            }
        }
    }

    fn summary(&self, cycles: u64, stop_reason: StopReason) -> RunSummary {
        RunSummary { cycles, stop_reason }
    }

    /// Blocking wait that wakes early on cancellation. Returns false if the
    /// wait was cut short.
    fn sleep_unless_cancelled(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}
