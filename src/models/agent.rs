// Agent records: user-owned remote endpoints registered for future polling

use serde::{Deserialize, Serialize};

pub const DEFAULT_INTERVAL_SECS: u32 = 60;
pub const MIN_INTERVAL_SECS: u32 = 10;

/// Agent health state; serializes to lowercase JSON (e.g. "active").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    Down,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Down => "down",
        }
    }

    /// Parse from the stored column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AgentStatus::Active),
            "inactive" => Some(AgentStatus::Inactive),
            "down" => Some(AgentStatus::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub url: String,
    /// Polling interval in seconds (>= 10).
    pub interval: u32,
    pub status: AgentStatus,
    /// Epoch milliseconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgent {
    pub name: String,
    pub url: String,
    pub interval: Option<u32>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAgent {
    pub name: Option<String>,
    pub url: Option<String>,
    pub interval: Option<u32>,
    pub status: Option<AgentStatus>,
}
