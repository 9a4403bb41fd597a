use std::time::{Duration, Instant};

use sysinfo::{get_current_pid, ProcessExt, System, SystemExt};

/// Resident memory of this process in bytes, if the platform reports it.
pub fn monitor_memory() -> Option<u64> {
    let pid = get_current_pid().ok()?;
    let mut sys = System::new();
    sys.refresh_process(pid);
    sys.process(pid).map(|process| process.memory())
}

/// Wall time and memory growth across a run.
pub struct RunMonitor {
    start_time: Instant,
    start_memory: Option<u64>,
}

impl RunMonitor {
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
            start_memory: monitor_memory(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Bytes gained since `start`, saturating at zero.
    pub fn memory_delta(&self) -> Option<u64> {
        let end = monitor_memory()?;
        Some(end.saturating_sub(self.start_memory?))
    }
}
