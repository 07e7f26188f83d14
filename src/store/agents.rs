// Agent record queries

use crate::models::{Agent, AgentStatus, UpdateAgent};
use crate::store::Store;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

fn parse_agent_row(row: &SqliteRow) -> anyhow::Result<Agent> {
    let status_raw: String = row.try_get("status")?;
    let status = AgentStatus::parse(&status_raw)
        .ok_or_else(|| anyhow::anyhow!("unknown agent status in store: {}", status_raw))?;
    Ok(Agent {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        url: row.try_get("url")?,
        interval: row.try_get::<i64, _>("interval")? as u32,
        status,
        created_at: row.try_get("created_at")?,
    })
}

impl Store {
    #[instrument(skip(self), fields(repo = "store", operation = "create_agent"))]
    pub async fn create_agent(
        &self,
        user_id: i64,
        name: &str,
        url: &str,
        interval: u32,
    ) -> anyhow::Result<Agent> {
        let created_at = Self::now_ms();
        let status = AgentStatus::Active;
        let result = sqlx::query(
            "INSERT INTO agents (user_id, name, url, interval, status, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user_id)
        .bind(name)
        .bind(url)
        .bind(interval as i64)
        .bind(status.as_str())
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(Agent {
            id: result.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            url: url.to_string(),
            interval,
            status,
            created_at,
        })
    }

    /// All agents owned by `user_id`, newest first.
    pub async fn list_agents(&self, user_id: i64) -> anyhow::Result<Vec<Agent>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, url, interval, status, created_at
             FROM agents WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(parse_agent_row(row)?);
        }
        Ok(out)
    }

    pub async fn get_agent(&self, id: i64) -> anyhow::Result<Option<Agent>> {
        let row = sqlx::query(
            "SELECT id, user_id, name, url, interval, status, created_at FROM agents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        row.as_ref().map(parse_agent_row).transpose()
    }

    /// Applies the provided fields, keeping stored values for absent ones.
    /// Returns the updated record, or None if the agent no longer exists.
    #[instrument(skip(self, changes), fields(repo = "store", operation = "update_agent"))]
    pub async fn update_agent(
        &self,
        id: i64,
        changes: &UpdateAgent,
    ) -> anyhow::Result<Option<Agent>> {
        sqlx::query(
            "UPDATE agents SET
                name = COALESCE($1, name),
                url = COALESCE($2, url),
                interval = COALESCE($3, interval),
                status = COALESCE($4, status)
             WHERE id = $5",
        )
        .bind(changes.name.as_deref())
        .bind(changes.url.as_deref())
        .bind(changes.interval.map(|i| i as i64))
        .bind(changes.status.map(|s| s.as_str()))
        .bind(id)
        .execute(self.pool())
        .await?;

        self.get_agent(id).await
    }

    /// Returns false if no row was deleted.
    #[instrument(skip(self), fields(repo = "store", operation = "delete_agent"))]
    pub async fn delete_agent(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM agents WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
