//! PostgreSQL engine over SQLx.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::engine::{BackendInfo, Engine};
use crate::error::{Error, Result};
use crate::url::ConnectTarget;

pub struct PostgresEngine {
    pool: PgPool,
    server_version: String,
}

impl PostgresEngine {
    /// Open a session for the target.
    pub async fn connect(target: &ConnectTarget) -> Result<Self> {
        let pool = PgPool::connect(&target.driver_url())
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        let server_version = sqlx::query_scalar::<_, String>("show server_version")
            .fetch_one(&pool)
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        Ok(Self {
            pool,
            server_version,
        })
    }
}

#[async_trait]
impl Engine for PostgresEngine {
    fn backend_info(&self) -> BackendInfo {
        BackendInfo {
            // Engine-layer name; the dialect resolver maps this to the
            // canonical "postgres".
            dialect: "postgresql".to_string(),
            driver: "sqlx".to_string(),
            server_version: self.server_version.clone(),
        }
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| Error::Connect(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
