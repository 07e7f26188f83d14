// Shared test helpers: fake measurement sources and app builders

use axum_test::TestServer;
use hostwatch::aggregator::MetricsProbe;
use hostwatch::config::AppConfig;
use hostwatch::models::{HostSample, InterfaceRates, MemorySample, VolumeUsage};
use hostwatch::routes;
use hostwatch::store::Store;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/test.db"
max_pool_size = 2

[auth]
jwt_secret = "test-secret"
token_ttl_secs = 3600

[metrics]
source_timeout_ms = 500
"#;

pub fn test_config() -> AppConfig {
    AppConfig::load_from_str(TEST_CONFIG).unwrap()
}

/// Probe returning canned samples, with optional per-source fault and
/// stall injection.
pub struct FakeProbe {
    pub cpu: f64,
    pub memory: MemorySample,
    pub volumes: Vec<VolumeUsage>,
    pub interfaces: Vec<InterfaceRates>,
    pub host: HostSample,
    /// Source name ("cpu", "memory", "disk", "network", "host") that
    /// returns an error.
    pub fail_source: Option<&'static str>,
    /// Source name that never completes (exercises the per-call timeout).
    pub stall_source: Option<&'static str>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            cpu: 12.5,
            memory: MemorySample {
                total: 8_000,
                active: 2_000,
            },
            volumes: vec![
                VolumeUsage {
                    mount: "/".into(),
                    size: 1_000,
                    used: 400,
                },
                VolumeUsage {
                    mount: "/data".into(),
                    size: 3_000,
                    used: 800,
                },
            ],
            interfaces: vec![
                InterfaceRates {
                    name: "eth0".into(),
                    rx_bytes_per_sec: Some(100.0),
                    tx_bytes_per_sec: Some(50.0),
                },
                InterfaceRates {
                    name: "eth1".into(),
                    rx_bytes_per_sec: Some(25.0),
                    tx_bytes_per_sec: None,
                },
            ],
            host: HostSample {
                uptime_secs: 3_600,
                load_average: [0.5, 0.4, 0.3],
            },
            fail_source: None,
            stall_source: None,
        }
    }
}

impl FakeProbe {
    pub fn failing(source: &'static str) -> Self {
        Self {
            fail_source: Some(source),
            ..Self::default()
        }
    }

    pub fn stalling(source: &'static str) -> Self {
        Self {
            stall_source: Some(source),
            ..Self::default()
        }
    }

    async fn gate(&self, source: &'static str) -> anyhow::Result<()> {
        if self.stall_source == Some(source) {
            tokio::time::sleep(std::time::Duration::from_secs(3_600)).await;
        }
        if self.fail_source == Some(source) {
            anyhow::bail!("injected {} failure", source);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MetricsProbe for FakeProbe {
    async fn cpu_usage(&self) -> anyhow::Result<f64> {
        self.gate("cpu").await?;
        Ok(self.cpu)
    }

    async fn memory(&self) -> anyhow::Result<MemorySample> {
        self.gate("memory").await?;
        Ok(self.memory)
    }

    async fn volumes(&self) -> anyhow::Result<Vec<VolumeUsage>> {
        self.gate("disk").await?;
        Ok(self.volumes.clone())
    }

    async fn interfaces(&self) -> anyhow::Result<Vec<InterfaceRates>> {
        self.gate("network").await?;
        Ok(self.interfaces.clone())
    }

    async fn host(&self) -> anyhow::Result<HostSample> {
        self.gate("host").await?;
        Ok(self.host)
    }
}

/// App over a fresh temp SQLite file and the given probe. The TempDir must
/// stay alive for the duration of the test.
pub async fn test_app_with_probe(probe: Arc<dyn MetricsProbe>) -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let store = Arc::new(Store::connect(path.to_str().unwrap(), 2).await.unwrap());
    store.init().await.unwrap();
    let app = routes::app(store, probe, test_config());
    (TestServer::new(app), dir)
}

pub async fn test_app() -> (TestServer, TempDir) {
    test_app_with_probe(Arc::new(FakeProbe::default())).await
}

/// Registers a fresh user and returns their bearer token.
pub async fn register(server: &TestServer, username: &str, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": "hunter22",
        }))
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    json["token"].as_str().unwrap().to_string()
}
