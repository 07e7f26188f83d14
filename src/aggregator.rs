// Snapshot aggregator: concurrent fan-out over the measurement sources,
// join, then derived-field arithmetic. All-or-nothing: any failed or
// timed-out source aborts the whole snapshot.

use crate::models::{
    HostSample, InterfaceRates, MemorySample, MetricsSnapshot, SnapshotStatus, VolumeUsage,
};
use std::future::Future;
use std::time::Duration;
use tracing::instrument;

/// One category of OS-level measurement. Each call is independent,
/// read-only, and may fail without affecting the others.
#[async_trait::async_trait]
pub trait MetricsProbe: Send + Sync {
    /// Instantaneous CPU load percentage, 0-100.
    async fn cpu_usage(&self) -> anyhow::Result<f64>;
    async fn memory(&self) -> anyhow::Result<MemorySample>;
    async fn volumes(&self) -> anyhow::Result<Vec<VolumeUsage>>;
    async fn interfaces(&self) -> anyhow::Result<Vec<InterfaceRates>>;
    async fn host(&self) -> anyhow::Result<HostSample>;
}

/// Bounds a source call by `limit`; a timeout is reported like any other
/// source failure.
async fn bounded<T>(
    source: &'static str,
    limit: Duration,
    call: impl Future<Output = anyhow::Result<T>> + Send,
) -> anyhow::Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => Err(e.context(format!("{source} source failed"))),
        Err(_) => anyhow::bail!("{} source timed out after {:?}", source, limit),
    }
}

/// Collects one snapshot. All five sources run concurrently; the first
/// failure aborts the join and the in-flight calls are dropped. No state
/// is retained between invocations.
#[instrument(skip(probe, source_timeout))]
pub async fn collect_snapshot(
    probe: &dyn MetricsProbe,
    source_timeout: Duration,
) -> anyhow::Result<MetricsSnapshot> {
    let (cpu_usage, memory, volumes, interfaces, host) = tokio::try_join!(
        bounded("cpu", source_timeout, probe.cpu_usage()),
        bounded("memory", source_timeout, probe.memory()),
        bounded("disk", source_timeout, probe.volumes()),
        bounded("network", source_timeout, probe.interfaces()),
        bounded("host", source_timeout, probe.host()),
    )?;

    Ok(build_snapshot(cpu_usage, memory, &volumes, &interfaces, host))
}

/// Pure derivation from settled source values to the wire snapshot.
fn build_snapshot(
    cpu_usage: f64,
    memory: MemorySample,
    volumes: &[VolumeUsage],
    interfaces: &[InterfaceRates],
    host: HostSample,
) -> MetricsSnapshot {
    let mut disk_size: u64 = 0;
    let mut disk_used: u64 = 0;
    for v in volumes {
        disk_size = disk_size.saturating_add(v.size);
        disk_used = disk_used.saturating_add(v.used);
    }
    // A host with no reported volumes must yield 0, not NaN.
    let disk_usage = if disk_size > 0 {
        (disk_used as f64 / disk_size as f64) * 100.0
    } else {
        0.0
    };
    let disk_free = disk_size.saturating_sub(disk_used);

    // Interfaces without a rate baseline yet contribute 0.
    let mut network_in = 0.0;
    let mut network_out = 0.0;
    for iface in interfaces {
        network_in += iface.rx_bytes_per_sec.unwrap_or(0.0);
        network_out += iface.tx_bytes_per_sec.unwrap_or(0.0);
    }

    let ram_usage = if memory.total > 0 {
        (memory.active as f64 / memory.total as f64) * 100.0
    } else {
        0.0
    };

    let [load_1m, load_5m, load_15m] = host.load_average;

    MetricsSnapshot {
        cpu_usage,
        ram_usage,
        disk_usage,
        disk_free,
        network_in,
        network_out,
        uptime: host.uptime_secs,
        status: SnapshotStatus::Online,
        // Captured once, after every source has settled.
        timestamp: chrono::Utc::now().timestamp_millis(),
        load_average_1m: load_1m,
        load_average_5m: load_5m,
        load_average_15m: load_15m,
    }
}
