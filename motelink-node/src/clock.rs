use embassy_time::Instant;

use motelink_api::TimeProvider;

/// Millisecond uptime clock pinned to the instant it was created.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    boot_instant: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            boot_instant: Instant::now(),
        }
    }
}

impl TimeProvider for MonotonicClock {
    fn uptime_ms(&self) -> u64 {
        self.boot_instant.elapsed().as_millis()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
