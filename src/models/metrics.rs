// Metrics snapshot and per-source sample records

use serde::{Deserialize, Serialize};

/// Memory measurement. `active` is the portion in use (total minus
/// reclaimable), in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySample {
    pub total: u64,
    pub active: u64,
}

/// One mounted volume's capacity and usage, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeUsage {
    pub mount: String,
    pub size: u64,
    pub used: u64,
}

/// Instantaneous transfer rates for one network interface.
/// Rates are `None` until a baseline observation exists (first call).
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRates {
    pub name: String,
    pub rx_bytes_per_sec: Option<f64>,
    pub tx_bytes_per_sec: Option<f64>,
}

/// Host-level measurement: uptime and the OS load-average triplet
/// (1m, 5m, 15m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSample {
    pub uptime_secs: u64,
    pub load_average: [f64; 3],
}

/// Snapshot health marker. Only `online` exists today; reserved for
/// degraded states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotStatus {
    Online,
}

/// Point-in-time host utilization snapshot returned by GET /api/metrics.
/// Constructed atomically per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Instantaneous CPU load, 0-100.
    pub cpu_usage: f64,
    /// Active memory over total memory, 0-100.
    pub ram_usage: f64,
    /// Used space over total space across all mounted volumes, 0-100.
    pub disk_usage: f64,
    /// Free bytes across all mounted volumes.
    pub disk_free: u64,
    /// Sum of receive rates over all interfaces, bytes/sec.
    pub network_in: f64,
    /// Sum of transmit rates over all interfaces, bytes/sec.
    pub network_out: f64,
    /// Host uptime in seconds.
    pub uptime: u64,
    pub status: SnapshotStatus,
    /// Epoch milliseconds, captured once after all sources settle.
    pub timestamp: i64,
    pub load_average_1m: f64,
    pub load_average_5m: f64,
    pub load_average_15m: f64,
}
