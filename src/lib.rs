//! # sqlhub
//!
//! A multi-backend SQL connection registry: establish, name, track, and
//! tear down connections to relational database backends, resolve each
//! connection's dialect for feature gating, and keep credentials out of
//! every displayed string.
//!
//! The registry is an explicit value owned by the embedding front end
//! (notebook or CLI command loop); it enforces a single "current
//! connection" across connect/switch/close and hands out [`Connection`]
//! handles callers can keep across registry mutations.
//!
//! ```ignore
//! use sqlhub::ConnectionRegistry;
//!
//! let mut registry = ConnectionRegistry::new();
//! smol::block_on(async {
//!     registry.connect("duckdb://", Some("analytics")).await?;
//!     registry.connect("sqlite://", None).await?;
//!     registry.switch("analytics")?;
//!     registry.display_current(); // Running query in 'duckdb://'
//!     registry.close_all().await?;
//!     Ok::<_, Box<dyn std::error::Error>>(())
//! })
//! # ;
//! ```
//!
//! Backends are selected by Cargo feature: `sqlite`, `postgres`, `mysql`
//! (SQLx) and `duckdb` (bundled native crate). Connect strings for
//! backends that are not compiled in fail with an actionable
//! missing-driver error naming the crate to enable.

mod connection;
mod dialect;
mod drivers;
mod engine;
mod error;
mod registry;
mod url;

pub use connection::{Connection, CustomConnection, is_custom_connection};
pub use dialect::{DialectDef, DialectFeatures, TokenizerDef, canonicalize, canonicalize_with};
pub use drivers::ConnectionFactory;
pub use drivers::packages::{BackendFamily, DIALECT_EXCEPTIONS, DriverSpec, driver_for_scheme};
pub use drivers::probe::{CompiledDrivers, DriverProbe};
pub use engine::{BackendInfo, BoxedEngine, Engine};
pub use error::{CloseFailures, Error, Result};
pub use registry::{ConnectionDescriptor, ConnectionRegistry, TABLE_HEADERS};
pub use crate::url::{ConnectTarget, MASK_TOKEN, connection_name, mask_url};
