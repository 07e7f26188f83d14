// Domain models (snake_case wire format for the dashboard API)

mod agent;
mod metrics;
mod user;

pub use agent::{
    Agent, AgentStatus, CreateAgent, DEFAULT_INTERVAL_SECS, MIN_INTERVAL_SECS, UpdateAgent,
};
pub use metrics::{
    HostSample, InterfaceRates, MemorySample, MetricsSnapshot, SnapshotStatus, VolumeUsage,
};
pub use user::{Credentials, Registration, TokenResponse, User, UserProfile};
