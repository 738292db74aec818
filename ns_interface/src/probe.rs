//! Kernel-state probe

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reports whether a preemptive scheduler is servicing threads on this core
///
/// No side effects. Must be callable before any scheduler object exists
/// and return `false` in that case.
pub trait SchedulerProbe: Send + Sync {
    /// Returns true iff a scheduler is currently running
    fn kernel_running(&self) -> bool;
}

/// Probe backed by an explicitly managed flag
///
/// The embedder flips the flag when it starts or stops its scheduler;
/// until then the probe reports "not running".
#[derive(Debug, Default)]
pub struct StaticSchedulerProbe {
    running: AtomicBool,
}

impl StaticSchedulerProbe {
    /// Creates a probe reporting "no scheduler"
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Creates a probe in the given state, wrapped for sharing
    pub fn shared(running: bool) -> Arc<Self> {
        let probe = Self::new();
        probe.set_running(running);
        Arc::new(probe)
    }

    /// Records a scheduler state change
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }
}

impl SchedulerProbe for StaticSchedulerProbe {
    fn kernel_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
