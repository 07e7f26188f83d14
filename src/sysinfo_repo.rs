// Live measurement sources via sysinfo

use crate::aggregator::MetricsProbe;
use crate::models::{HostSample, InterfaceRates, MemorySample, VolumeUsage};
use std::sync::Arc;
use std::time::Instant;
use sysinfo::{Disks, Networks, System};
use tracing::instrument;

/// Byte counters from the previous network observation, used to turn
/// cumulative totals into instantaneous rates.
struct NetworkBaseline {
    taken_at: Instant,
    counters: Vec<(String, u64, u64)>,
}

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    last_network: Arc<std::sync::Mutex<Option<NetworkBaseline>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
            last_network: Arc::new(std::sync::Mutex::new(None)),
        }
    }
}

#[async_trait::async_trait]
impl MetricsProbe for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_usage"))]
    async fn cpu_usage(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            // Two refreshes with the minimum interval between them; usage is
            // a delta and needs a baseline.
            sys.refresh_cpu_all();
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            sys.refresh_cpu_all();
            let usage = sys.global_cpu_usage() as f64;
            Ok(usage.clamp(0.0, 100.0))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    async fn memory(&self) -> anyhow::Result<MemorySample> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let active = total.saturating_sub(sys.available_memory());
            Ok(MemorySample { total, active })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "volumes"))]
    async fn volumes(&self) -> anyhow::Result<Vec<VolumeUsage>> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(false);
            let volumes = disks_guard
                .list()
                .iter()
                .map(|d| {
                    let size = d.total_space();
                    VolumeUsage {
                        mount: d.mount_point().to_string_lossy().into_owned(),
                        size,
                        used: size.saturating_sub(d.available_space()),
                    }
                })
                .collect();
            Ok(volumes)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "interfaces"))]
    async fn interfaces(&self) -> anyhow::Result<Vec<InterfaceRates>> {
        let networks = self.networks.clone();
        let last_network = self.last_network.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks_guard.refresh(true);
            let counters: Vec<(String, u64, u64)> = networks_guard
                .list()
                .iter()
                .map(|(name, data)| (name.clone(), data.total_received(), data.total_transmitted()))
                .collect();

            let now = Instant::now();
            let mut interfaces: Vec<InterfaceRates> = counters
                .iter()
                .map(|(name, _, _)| InterfaceRates {
                    name: name.clone(),
                    rx_bytes_per_sec: None,
                    tx_bytes_per_sec: None,
                })
                .collect();

            let mut baseline_guard = last_network
                .lock()
                .map_err(|e| anyhow::anyhow!("network baseline lock poisoned: {}", e))?;
            if let Some(prev) = baseline_guard.as_ref() {
                let dt_secs = now.duration_since(prev.taken_at).as_secs_f64();
                if dt_secs > 0.0 {
                    for (iface, (_, rx, tx)) in interfaces.iter_mut().zip(counters.iter()) {
                        if let Some((_, prev_rx, prev_tx)) =
                            prev.counters.iter().find(|(n, _, _)| n == &iface.name)
                        {
                            let drx = rx.saturating_sub(*prev_rx);
                            let dtx = tx.saturating_sub(*prev_tx);
                            iface.rx_bytes_per_sec = Some(drx as f64 / dt_secs);
                            iface.tx_bytes_per_sec = Some(dtx as f64 / dt_secs);
                        }
                    }
                }
            }
            *baseline_guard = Some(NetworkBaseline {
                taken_at: now,
                counters,
            });

            Ok(interfaces)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "host"))]
    async fn host(&self) -> anyhow::Result<HostSample> {
        tokio::task::spawn_blocking(move || {
            let load = System::load_average();
            Ok(HostSample {
                uptime_secs: System::uptime(),
                load_average: [load.one, load.five, load.fifteen],
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}
