//! SQLite engine over SQLx.
//!
//! `sqlite://` with no path opens an in-memory database; a path opens or
//! creates the file.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::engine::{BackendInfo, Engine};
use crate::error::{Error, Result};
use crate::url::ConnectTarget;

pub struct SqliteEngine {
    pool: SqlitePool,
    server_version: String,
}

impl SqliteEngine {
    /// Open a session for the target.
    pub async fn connect(target: &ConnectTarget) -> Result<Self> {
        let options = Self::build_connect_options(target)?;

        // A single connection keeps in-memory databases alive for the
        // lifetime of the pool.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        let server_version = sqlx::query_scalar::<_, String>("select sqlite_version()")
            .fetch_one(&pool)
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        Ok(Self {
            pool,
            server_version,
        })
    }

    fn build_connect_options(target: &ConnectTarget) -> Result<SqliteConnectOptions> {
        let path = target.url().path();
        if path.is_empty() || path == "/" {
            SqliteConnectOptions::from_str(":memory:")
                .map(|o| o.shared_cache(true))
                .map_err(|e| Error::Connect(e.to_string()))
        } else {
            Ok(SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .foreign_keys(true))
        }
    }
}

#[async_trait]
impl Engine for SqliteEngine {
    fn backend_info(&self) -> BackendInfo {
        BackendInfo {
            dialect: "sqlite".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_session_reports_sqlite_dialect() {
        smol::block_on(async {
            let target = ConnectTarget::parse("sqlite://").unwrap();
            let engine = SqliteEngine::connect(&target).await.unwrap();

            let info = engine.backend_info();
            assert_eq!(info.dialect, "sqlite");
            assert_eq!(info.driver, "sqlx");
            assert!(!info.server_version.is_empty());
        });
    }

    #[test]
    fn execute_round_trip() {
        smol::block_on(async {
            let target = ConnectTarget::parse("sqlite://").unwrap();
            let engine = SqliteEngine::connect(&target).await.unwrap();

            engine
                .execute("create table t (id integer primary key)")
                .await
                .unwrap();
            let affected = engine.execute("insert into t values (1), (2)").await.unwrap();
            assert_eq!(affected, 2);
        });
    }

    #[test]
    fn file_backed_database() {
        smol::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("t.db");
            let raw = format!("sqlite://{}", path.display());
            let target = ConnectTarget::parse(&raw).unwrap();

            let engine = SqliteEngine::connect(&target).await.unwrap();
            engine.execute("create table t (id integer)").await.unwrap();
            assert!(path.exists());
        });
    }
}
