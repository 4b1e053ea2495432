//! The connection registry: process-wide table of named handles.
//!
//! The registry owns every handle, the alias index, and the single
//! "current connection" marker. It is an explicit value with a lifecycle,
//! not an ambient global: construct one at process start, and call
//! [`ConnectionRegistry::reset`] for test isolation. All mutations happen under
//! `&mut self`, so readers can never observe a partially updated state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::connection::{Connection, CustomConnection};
use crate::drivers::ConnectionFactory;
use crate::engine::BoxedEngine;
use crate::error::{CloseFailures, Error, Result};
use crate::url::ConnectTarget;

/// Column headers for [`ConnectionRegistry::connections_table`].
pub const TABLE_HEADERS: [&str; 3] = ["current", "url", "alias"];

/// One row of the registry listing. The URL is always masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionDescriptor {
    /// Canonical lookup key (usable with switch/close). Not a display
    /// string; render `url` instead.
    pub key: String,
    pub url: String,
    pub alias: Option<String>,
    pub current: bool,
}

/// Registry of live connections with a single current handle.
pub struct ConnectionRegistry {
    handles: HashMap<String, Arc<Connection>>,
    alias_index: HashMap<String, String>,
    current: Option<String>,
    next_order: u64,
    factory: ConnectionFactory,
}

impl ConnectionRegistry {
    /// Registry backed by the default factory (compiled-in drivers).
    pub fn new() -> Self {
        Self::with_factory(ConnectionFactory::new())
    }

    /// Registry backed by a caller-supplied factory.
    pub fn with_factory(factory: ConnectionFactory) -> Self {
        Self {
            handles: HashMap::new(),
            alias_index: HashMap::new(),
            current: None,
            next_order: 0,
            factory,
        }
    }

    /// Drop all state without closing engines. Intended for test
    /// isolation; production teardown goes through [`Self::close_all`].
    pub fn reset(&mut self) {
        self.handles.clear();
        self.alias_index.clear();
        self.current = None;
        self.next_order = 0;
    }

    /// Establish (or reuse) a connection and make it current.
    ///
    /// Re-registering an already-known normalized connect string reuses
    /// the existing handle instead of opening a second physical
    /// connection. A supplied alias rebinds to this registration,
    /// replacing any previous alias of the handle; registering without an
    /// alias leaves an existing alias in place.
    pub async fn connect(&mut self, raw: &str, alias: Option<&str>) -> Result<Arc<Connection>> {
        let target = ConnectTarget::parse(raw)?;
        let key = target.key().to_string();

        if let Some(existing) = self.handles.get(&key).cloned() {
            tracing::debug!(%key, "reusing existing connection");
            if let Some(alias) = alias {
                self.bind_alias(alias, &key);
            }
            self.current = Some(key);
            return Ok(existing);
        }

        let engine = self.factory.open(&target).await?;
        let handle = Arc::new(Connection::new(
            key.clone(),
            Some(target.url().clone()),
            self.next_order,
            engine,
        ));
        self.next_order += 1;

        tracing::debug!(%key, alias, "registered connection");
        self.handles.insert(key.clone(), Arc::clone(&handle));
        if let Some(alias) = alias {
            self.bind_alias(alias, &key);
        }
        self.current = Some(key);
        Ok(handle)
    }

    /// Adopt a caller-supplied engine under the given key, bypassing the
    /// factory. The adopted connection becomes current.
    pub fn adopt_engine(
        &mut self,
        engine: BoxedEngine,
        key: &str,
        alias: Option<&str>,
    ) -> CustomConnection {
        let handle = match self.handles.get(key) {
            Some(existing) => Arc::clone(existing),
            None => {
                let handle = Arc::new(Connection::new(
                    key.to_string(),
                    ConnectTarget::parse(key).ok().map(|t| t.url().clone()),
                    self.next_order,
                    engine,
                ));
                self.next_order += 1;
                self.handles.insert(key.to_string(), Arc::clone(&handle));
                handle
            }
        };

        if let Some(alias) = alias {
            self.bind_alias(alias, key);
        }
        self.current = Some(key.to_string());
        CustomConnection(handle)
    }

    // Alias rebinds to the latest registration: drop the handle's previous
    // alias, then claim the name (stealing it from another key if needed).
    fn bind_alias(&mut self, alias: &str, key: &str) {
        self.alias_index.retain(|_, bound_key| bound_key != key);
        self.alias_index.insert(alias.to_string(), key.to_string());
    }

    /// Resolve a name (alias first, then key) to a handle.
    pub fn get(&self, name: &str) -> Option<&Arc<Connection>> {
        let key = self.alias_index.get(name).map(String::as_str).unwrap_or(name);
        self.handles.get(key)
    }

    /// Make the named connection current.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownConnection`] when the name resolves neither as an
    /// alias nor as a key.
    pub fn switch(&mut self, name: &str) -> Result<&Arc<Connection>> {
        let key = self.resolve(name)?;
        self.current = Some(key.clone());
        // Resolve just proved membership.
        self.handles
            .get(&key)
            .ok_or_else(|| Error::UnknownConnection(name.to_string()))
    }

    fn resolve(&self, name: &str) -> Result<String> {
        if let Some(key) = self.alias_index.get(name) {
            return Ok(key.clone());
        }
        if self.handles.contains_key(name) {
            return Ok(name.to_string());
        }
        Err(Error::UnknownConnection(name.to_string()))
    }

    /// The current handle, if any.
    pub fn current(&self) -> Option<&Arc<Connection>> {
        self.current.as_ref().and_then(|key| self.handles.get(key))
    }

    /// Number of tracked handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// One descriptor per handle: current handle first, then creation
    /// order. URLs are masked.
    pub fn list(&self) -> Vec<ConnectionDescriptor> {
        let mut handles: Vec<&Arc<Connection>> = self.handles.values().collect();
        handles.sort_by_key(|handle| {
            let current = self.current.as_deref() == Some(handle.key());
            (!current, handle.created_order())
        });

        handles
            .into_iter()
            .map(|handle| ConnectionDescriptor {
                key: handle.key().to_string(),
                url: handle.masked_url(),
                alias: self.alias_of(handle.key()),
                current: self.current.as_deref() == Some(handle.key()),
            })
            .collect()
    }

    /// Listing rows under [`TABLE_HEADERS`]: `["*"|"", url, alias|""]`.
    pub fn connections_table(&self) -> Vec<[String; 3]> {
        self.list()
            .into_iter()
            .map(|descriptor| {
                [
                    if descriptor.current { "*" } else { "" }.to_string(),
                    descriptor.url,
                    descriptor.alias.unwrap_or_default(),
                ]
            })
            .collect()
    }

    fn alias_of(&self, key: &str) -> Option<String> {
        self.alias_index
            .iter()
            .find(|(_, bound_key)| bound_key.as_str() == key)
            .map(|(alias, _)| alias.clone())
    }

    /// Close the named connection and purge it (and its alias).
    ///
    /// If it was current, the registry is left without a current handle;
    /// the caller must switch explicitly before further use.
    pub async fn close(&mut self, name: &str) -> Result<()> {
        let key = self.resolve(name)?;
        let handle = self
            .handles
            .remove(&key)
            .ok_or_else(|| Error::UnknownConnection(name.to_string()))?;
        self.alias_index.retain(|_, bound_key| *bound_key != key);
        if self.current.as_deref() == Some(key.as_str()) {
            self.current = None;
        }

        tracing::debug!(%key, "closed connection");
        handle.close().await
    }

    /// Best-effort close of every handle.
    ///
    /// Per-handle failures are collected, not fatal; the registry is
    /// guaranteed empty afterwards either way.
    pub async fn close_all(&mut self) -> Result<(), CloseFailures> {
        let mut failures = Vec::new();
        for (key, handle) in self.handles.drain() {
            if let Err(error) = handle.close().await {
                tracing::warn!(%key, %error, "failed to close connection");
                failures.push((key, error));
            }
        }
        self.alias_index.clear();
        self.current = None;

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CloseFailures { failures })
        }
    }

    /// The status line for the current connection, if any.
    pub fn display_current_line(&self) -> Option<String> {
        self.current()
            .map(|handle| format!("Running query in '{}'", handle.masked_url()))
    }

    /// Print the status line for the current connection to stdout.
    /// No-op when the registry has no current handle. This is the only
    /// method that writes to stdout.
    pub fn display_current(&self) {
        if let Some(line) = self.display_current_line() {
            println!("{line}");
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
