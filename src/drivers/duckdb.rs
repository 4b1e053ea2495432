//! DuckDB engine over the bundled native crate.
//!
//! DuckDB's API is synchronous, so connecting is moved off-thread with
//! `smol::unblock` and statement execution runs inline under the handle
//! lock.

use std::sync::Mutex;

use async_trait::async_trait;
use duckdb::Connection;

use crate::engine::{BackendInfo, Engine};
use crate::error::{Error, Result};
use crate::url::ConnectTarget;

pub struct DuckDbEngine {
    connection: Mutex<Option<Connection>>,
    server_version: String,
}

impl DuckDbEngine {
    /// Open a session for the target. `duckdb://` with no path opens an
    /// in-memory database.
    pub async fn connect(target: &ConnectTarget) -> Result<Self> {
        let path = target.url().path().to_string();

        let (connection, server_version) = smol::unblock(
            move || -> duckdb::Result<(Connection, String)> {
                let connection = if path.is_empty() || path == "/" {
                    Connection::open_in_memory()?
                } else {
                    Connection::open(&path)?
                };
                let version: String =
                    connection.query_row("select version()", [], |row| row.get(0))?;
                Ok((connection, version))
            },
        )
        .await
        .map_err(|e| Error::Connect(e.to_string()))?;

        Ok(Self {
            connection: Mutex::new(Some(connection)),
            server_version,
        })
    }
}

#[async_trait]
impl Engine for DuckDbEngine {
    fn backend_info(&self) -> BackendInfo {
        BackendInfo {
            dialect: "duckdb".to_string(),
            driver: "duckdb".to_string(),
            server_version: self.server_version.clone(),
        }
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        let guard = self
            .connection
            .lock()
            .map_err(|_| Error::Connect("lock poisoned".to_string()))?;
        let connection = guard
            .as_ref()
            .ok_or_else(|| Error::ResourceClosed("duckdb".to_string()))?;

        connection
            .execute(sql, [])
            .map(|affected| affected as u64)
            .map_err(|e| Error::Connect(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        let connection = {
            let mut guard = self
                .connection
                .lock()
                .map_err(|_| Error::Connect("lock poisoned".to_string()))?;
            guard.take()
        };

        if let Some(connection) = connection {
            connection
                .close()
                .map_err(|(_, e)| Error::Connect(e.to_string()))?;
        }
        Ok(())
    }
}

// The native connection is not Sync; the Mutex serializes all access.
unsafe impl Send for DuckDbEngine {}
unsafe impl Sync for DuckDbEngine {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_session_reports_duckdb_dialect() {
        smol::block_on(async {
            let target = ConnectTarget::parse("duckdb://").unwrap();
            let engine = DuckDbEngine::connect(&target).await.unwrap();

            let info = engine.backend_info();
            assert_eq!(info.dialect, "duckdb");
            assert_eq!(info.driver, "duckdb");
            assert!(!info.server_version.is_empty());
        });
    }

    #[test]
    fn execute_after_close_is_resource_closed() {
        smol::block_on(async {
            let target = ConnectTarget::parse("duckdb://").unwrap();
            let mut engine = DuckDbEngine::connect(&target).await.unwrap();

            engine.execute("create table t (id integer)").await.unwrap();
            engine.close().await.unwrap();

            let err = engine.execute("select 1").await.unwrap_err();
            assert_eq!(err.error_type(), "ResourceClosedError");
        });
    }
}
