// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Process memory-footprint sampling and best-effort reclamation.
//!
//! Footprint reads are process-wide resident-set samples and inherently
//! approximate. Callers must run a reclamation pass and a settling pause
//! before each baseline read so that leftover allocations from earlier
//! phases do not leak into the delta.

use std::time::Duration;

use sysinfo::{Pid, System};

/// Samples the current process's resident set size.
pub struct MemoryProbe {
    system: System,
    pid: Pid,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: Pid::from_u32(std::process::id()),
        }
    }

    /// Current resident set size in KB.
    ///
    /// Returns 0 when the platform refuses process stats; the amplification
    /// delta then degrades to a zero reading instead of failing the run.
    pub fn resident_kb(&mut self) -> u64 {
        if !self.system.refresh_process(self.pid) {
            tracing::warn!(pid = %self.pid, "process memory refresh failed");
            return 0;
        }

        self.system
            .process(self.pid)
            .map(|process| process.memory() / 1024)
            .unwrap_or(0)
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Request a best-effort allocator reclamation pass, then pause so the
/// footprint settles before the next baseline read.
pub fn reclaim_and_settle(delay: Duration) {
    reclaim();
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

/// Return freed heap pages to the OS where the allocator supports it.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub fn reclaim() {
    tracing::debug!("requesting malloc_trim reclamation pass");
    unsafe {
        libc::malloc_trim(0);
    }
}

/// No reclamation hook on this target; the settling pause still applies.
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub fn reclaim() {}
