//! Core engine trait implemented by every database driver.

use async_trait::async_trait;

use crate::error::Result;

/// Backend metadata reported by a live engine.
///
/// Mirrors what the engine layer knows about the session: the backend's
/// dialect name, the client crate driving it, and the server version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    /// Dialect name as the engine layer reports it (pre-canonicalization).
    pub dialect: String,
    /// Name of the client crate serving the connection.
    pub driver: String,
    /// Server (or embedded library) version string.
    pub server_version: String,
}

/// A live session with one database backend.
///
/// Engines own the underlying pool or native handle exclusively. All
/// blocking I/O is the engine's concern; the registry only awaits it.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Backend metadata for the session.
    fn backend_info(&self) -> BackendInfo;

    /// Execute a statement, returning the affected row count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Connect`] with the backend's own diagnostic.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Release the underlying resources. Called exactly once, on close.
    async fn close(&mut self) -> Result<()>;
}

/// A boxed engine trait object.
pub type BoxedEngine = Box<dyn Engine>;
