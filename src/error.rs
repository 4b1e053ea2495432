//! Error surface for the connection registry.
//!
//! Every error carries a machine-checkable tag (see [`Error::error_type`])
//! so front ends can branch on the failure kind without parsing messages.
//! Backend diagnostics are passed through unmodified in [`Error::Connect`];
//! only missing drivers get an actionable install hint.

use thiserror::Error;

/// Errors produced by the registry and connection factory.
#[derive(Debug, Error)]
pub enum Error {
    /// The driver crate for the requested scheme is not linked into this
    /// build. Always user-actionable; never retried automatically.
    #[error("no driver available for '{scheme}', try to install package: {package}")]
    MissingDriver {
        /// The scheme (including subdriver) the user asked for.
        scheme: String,
        /// The crate that would provide the driver.
        package: String,
    },

    /// The backend rejected or could not establish the connection.
    /// The message is the underlying engine's own diagnostic.
    #[error("{0}")]
    Connect(String),

    /// The connect string could not be parsed.
    #[error("invalid connection string: {0}")]
    InvalidUrl(String),

    /// A switch or close referenced a key or alias not in the registry.
    #[error("no connection named '{0}'")]
    UnknownConnection(String),

    /// An operation was attempted on a handle whose engine was closed.
    #[error("connection '{0}' is closed")]
    ResourceClosed(String),
}

impl Error {
    /// Stable tag identifying the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MissingDriver { .. } => "MissingPackageError",
            Self::Connect(_) | Self::InvalidUrl(_) => "ConnectionError",
            Self::UnknownConnection(_) => "UnknownConnectionError",
            Self::ResourceClosed(_) => "ResourceClosedError",
        }
    }
}

/// Failures collected by a best-effort `close_all`.
///
/// The registry is cleared even when some handles fail to close; the
/// failures are reported here instead of aborting the loop.
#[derive(Debug, Error)]
#[error("{} connection(s) failed to close", .failures.len())]
pub struct CloseFailures {
    /// `(key, error)` pair for every handle that failed to close.
    pub failures: Vec<(String, Error)>,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_driver_message_carries_install_hint() {
        let err = Error::MissingDriver {
            scheme: "duckdb".to_string(),
            package: "duckdb".to_string(),
        };
        assert_eq!(err.error_type(), "MissingPackageError");
        assert!(err.to_string().contains("try to install package: duckdb"));
    }

    #[test]
    fn connect_passes_backend_message_through() {
        let err = Error::Connect("FATAL: password authentication failed".to_string());
        assert_eq!(err.error_type(), "ConnectionError");
        assert_eq!(err.to_string(), "FATAL: password authentication failed");
    }

    #[test]
    fn error_type_tags() {
        assert_eq!(
            Error::UnknownConnection("x".into()).error_type(),
            "UnknownConnectionError"
        );
        assert_eq!(
            Error::ResourceClosed("x".into()).error_type(),
            "ResourceClosedError"
        );
        assert_eq!(
            Error::InvalidUrl("x".into()).error_type(),
            "ConnectionError"
        );
    }
}
