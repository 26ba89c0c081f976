use std::sync::Mutex;
use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: String,
    pub elapsed: Duration,
}

/// Records how long each planning stage took. Disabled monitors record nothing.
pub struct StageMonitor {
    enabled: bool,
    started: Mutex<Instant>,
    last_mark: Mutex<Instant>,
    timings: Mutex<Vec<StageTiming>>,
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: Mutex::new(now),
            last_mark: Mutex::new(now),
            timings: Mutex::new(Vec::new()),
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new()),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts a fresh run: earlier timings are dropped and the clock restarts.
    pub fn begin(&self) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        if let Ok(mut started) = self.started.lock() {
            *started = now;
        }
        if let Ok(mut last) = self.last_mark.lock() {
            *last = now;
        }
        if let Ok(mut timings) = self.timings.lock() {
            timings.clear();
        }
    }

    /// Closes the current stage under `stage` and starts timing the next one.
    pub fn mark(&self, stage: &str) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let elapsed = match self.last_mark.lock() {
            Ok(mut last) => {
                let elapsed = now.duration_since(*last);
                *last = now;
                elapsed
            }
            Err(_) => return,
        };

        if let Ok(mut timings) = self.timings.lock() {
            timings.push(StageTiming {
                stage: stage.to_string(),
                elapsed,
            });
        }

        match self.memory_mb() {
            Some(memory) => tracing::info!("📊 {} - {:?}, Memory: {}MB", stage, elapsed, memory),
            None => tracing::info!("📊 {} - {:?}", stage, elapsed),
        }
    }

    pub fn timings(&self) -> Vec<StageTiming> {
        self.timings
            .lock()
            .map(|timings| timings.clone())
            .unwrap_or_default()
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }

        let total = self
            .started
            .lock()
            .map(|started| started.elapsed())
            .unwrap_or_default();
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Stages: {}",
            total,
            self.timings().len()
        );
    }

    #[cfg(feature = "cli")]
    fn memory_mb(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(|process| process.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn memory_mb(&self) -> Option<u64> {
        None
    }
}

impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
