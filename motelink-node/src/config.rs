use serde::{Deserialize, Serialize};

/// Tuning knobs for the sink side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Number of registry slots, i.e. how many sensors may pair at once.
    pub registry_capacity: usize,
    /// How often the sink broadcasts its presence while on the network.
    pub advertise_period_ms: u64,
    /// How often the sink logs the current telemetry table.
    pub report_period_ms: u64,
    /// Age past which a silent sensor is evicted.
    pub sensor_timeout_ms: u64,
    /// Largest stored telemetry payload.
    pub max_payload_len: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            registry_capacity: 5,
            advertise_period_ms: 60_000,
            report_period_ms: 1_000,
            sensor_timeout_ms: 60_000,
            max_payload_len: 64,
        }
    }
}

impl SinkConfig {
    pub fn with_registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }

    pub fn with_advertise_period(mut self, period_ms: u64) -> Self {
        self.advertise_period_ms = period_ms;
        self
    }

    pub fn with_report_period(mut self, period_ms: u64) -> Self {
        self.report_period_ms = period_ms;
        self
    }

    pub fn with_sensor_timeout(mut self, timeout_ms: u64) -> Self {
        self.sensor_timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_payload_len(mut self, len: usize) -> Self {
        self.max_payload_len = len;
        self
    }
}

/// Tuning knobs for a sensor node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Interval between telemetry reports once paired.
    pub report_period_ms: u64,
    /// Interval between discovery broadcasts / pairing retries.
    pub pair_period_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            report_period_ms: 1_000,
            pair_period_ms: 2_000,
        }
    }
}

impl SensorConfig {
    pub fn with_report_period(mut self, period_ms: u64) -> Self {
        self.report_period_ms = period_ms;
        self
    }

    pub fn with_pair_period(mut self, period_ms: u64) -> Self {
        self.pair_period_ms = period_ms;
        self
    }
}
