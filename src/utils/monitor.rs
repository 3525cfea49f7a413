//! Process resource checkpoints logged between load phases.

#[cfg(feature = "cli")]
mod enabled {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

    pub struct SystemMonitor {
        process: Option<(Mutex<System>, Pid)>,
        started: Instant,
        peak_memory_mb: AtomicU64,
    }

    impl SystemMonitor {
        pub fn new(enabled: bool) -> Self {
            let process = enabled
                .then(|| match sysinfo::get_current_pid() {
                    Ok(pid) => Some((Mutex::new(System::new()), pid)),
                    Err(e) => {
                        tracing::warn!("System monitoring unavailable: {}", e);
                        None
                    }
                })
                .flatten();

            Self {
                process,
                started: Instant::now(),
                peak_memory_mb: AtomicU64::new(0),
            }
        }

        /// Current `(cpu %, resident MB)` of this process.
        fn sample(&self) -> Option<(f32, u64)> {
            let (system, pid) = self.process.as_ref()?;
            let mut system = system.lock().ok()?;
            system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[*pid]),
                true,
                ProcessRefreshKind::nothing().with_cpu().with_memory(),
            );

            let process = system.process(*pid)?;
            let memory_mb = process.memory() / 1024 / 1024;
            self.peak_memory_mb.fetch_max(memory_mb, Ordering::Relaxed);
            Some((process.cpu_usage(), memory_mb))
        }

        pub fn log_stats(&self, phase: &str) {
            if let Some((cpu, memory_mb)) = self.sample() {
                tracing::info!(
                    "📊 {} - CPU: {:.1}%, Memory: {}MB, Time: {:?}",
                    phase,
                    cpu,
                    memory_mb,
                    self.started.elapsed()
                );
            }
        }

        pub fn log_final_stats(&self) {
            if self.sample().is_some() {
                tracing::info!(
                    "📊 Load finished in {:?}, peak memory {}MB",
                    self.started.elapsed(),
                    self.peak_memory_mb.load(Ordering::Relaxed)
                );
            }
        }

        pub fn is_enabled(&self) -> bool {
            self.process.is_some()
        }
    }
}

#[cfg(feature = "cli")]
pub use enabled::SystemMonitor;

#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
