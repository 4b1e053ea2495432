//! MySQL/MariaDB engine over SQLx.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::engine::{BackendInfo, Engine};
use crate::error::{Error, Result};
use crate::url::ConnectTarget;

pub struct MySqlEngine {
    pool: MySqlPool,
    server_version: String,
}

impl MySqlEngine {
    /// Open a session for the target. `mariadb://` spellings are rewritten
    /// to the `mysql://` form the client crate expects.
    pub async fn connect(target: &ConnectTarget) -> Result<Self> {
        let mut driver_url = target.driver_url();
        if target.base_scheme() == "mariadb" {
            driver_url = driver_url.replacen("mariadb", "mysql", 1);
        }

        let pool = MySqlPool::connect(&driver_url)
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        let server_version = sqlx::query_scalar::<_, String>("select version()")
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
impl Engine for MySqlEngine {
    fn backend_info(&self) -> BackendInfo {
        BackendInfo {
            dialect: "mysql".to_string(),
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
