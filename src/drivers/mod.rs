//! Driver resolution and engine construction.
//!
//! The factory turns a parsed connect target into a live engine: resolve
//! the driver crate for the scheme, check it is actually linked into this
//! build, then hand off to the backend's constructor. A missing driver is
//! the only failure that gets reinterpreted (into an install hint); every
//! other failure surfaces the backend's own diagnostic.

pub mod packages;
pub mod probe;

#[cfg(feature = "duckdb")]
mod duckdb;
#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;

use crate::engine::BoxedEngine;
use crate::error::{Error, Result};
use crate::url::ConnectTarget;

use packages::BackendFamily;
use probe::{CompiledDrivers, DriverProbe};

/// Creates engines for connect targets.
pub struct ConnectionFactory {
    probe: Box<dyn DriverProbe>,
}

impl ConnectionFactory {
    /// Factory answering driver availability from the compiled feature set.
    pub fn new() -> Self {
        Self::with_probe(Box::new(CompiledDrivers))
    }

    /// Factory with a caller-supplied availability probe.
    pub fn with_probe(probe: Box<dyn DriverProbe>) -> Self {
        Self { probe }
    }

    /// Build an engine and open a session for the target.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingDriver`] when the resolved driver crate is not
    ///   linked into this build (carries the crate name to install).
    /// - [`Error::Connect`] for an unknown scheme or any backend-side
    ///   connection failure, message passed through unmodified.
    pub async fn open(&self, target: &ConnectTarget) -> Result<BoxedEngine> {
        let driver = packages::driver_for_scheme(target.scheme(), target.base_scheme())
            .ok_or_else(|| {
                Error::Connect(format!("unsupported backend scheme '{}'", target.scheme()))
            })?;

        if !self.probe.is_available(&driver) {
            return Err(Error::MissingDriver {
                scheme: target.scheme().to_string(),
                package: driver.package.to_string(),
            });
        }

        tracing::debug!(
            scheme = target.scheme(),
            package = driver.package,
            "opening engine"
        );

        match driver.family {
            #[cfg(feature = "sqlite")]
            BackendFamily::Sqlite => Ok(Box::new(sqlite::SqliteEngine::connect(target).await?)),
            #[cfg(feature = "duckdb")]
            BackendFamily::DuckDb => Ok(Box::new(duckdb::DuckDbEngine::connect(target).await?)),
            #[cfg(feature = "postgres")]
            BackendFamily::PostgreSql => {
                Ok(Box::new(postgres::PostgresEngine::connect(target).await?))
            }
            #[cfg(feature = "mysql")]
            BackendFamily::MySql => Ok(Box::new(mysql::MySqlEngine::connect(target).await?)),
            // Families whose constructor is not compiled into this build.
            _ => Err(Error::MissingDriver {
                scheme: target.scheme().to_string(),
                package: driver.package.to_string(),
            }),
        }
    }
}

impl Default for ConnectionFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packages::DriverSpec;

    /// Probe simulating a build with no driver crates linked at all.
    struct NoDrivers;

    impl DriverProbe for NoDrivers {
        fn is_available(&self, _driver: &DriverSpec) -> bool {
            false
        }
    }

    #[test]
    fn missing_driver_names_the_exact_package() {
        let factory = ConnectionFactory::with_probe(Box::new(NoDrivers));

        let cases = [
            // MySQL + MariaDB
            ("mysql://", "sqlx"),
            ("mysql+mysql://", "mysql"),
            ("mysql+mysql-async://", "mysql_async"),
            ("mariadb://", "sqlx"),
            ("mariadb+mysql://", "mysql"),
            // PostgreSQL
            ("postgresql://", "sqlx"),
            ("postgresql+tokio-postgres://", "tokio-postgres"),
            ("postgresql+postgres://", "postgres"),
            // SQLite + DuckDB
            ("sqlite+rusqlite://", "rusqlite"),
            ("duckdb://", "duckdb"),
            // Oracle
            ("oracle://", "oracle"),
            ("oracle+sibyl://", "sibyl"),
            // MSSQL
            ("mssql://", "tiberius"),
            ("mssql+odbc://", "odbc-api"),
        ];

        smol::block_on(async {
            for (connect_str, package) in cases {
                let target = ConnectTarget::parse(connect_str).unwrap();
                let Err(err) = factory.open(&target).await else {
                    panic!("{connect_str}: expected a missing-driver error");
                };

                assert_eq!(err.error_type(), "MissingPackageError", "{connect_str}");
                assert!(
                    err.to_string()
                        .contains(&format!("try to install package: {package}")),
                    "{connect_str}: {err}"
                );
            }
        });
    }

    #[test]
    fn unknown_scheme_is_a_plain_connection_error() {
        let factory = ConnectionFactory::new();
        smol::block_on(async {
            let target = ConnectTarget::parse("mongodb://localhost/app").unwrap();
            let Err(err) = factory.open(&target).await else {
                panic!("expected an error for an unsupported scheme");
            };
            assert_eq!(err.error_type(), "ConnectionError");
        });
    }

    #[cfg(feature = "duckdb")]
    #[test]
    fn uncompiled_family_yields_missing_driver_even_if_probed_available() {
        struct EverythingAvailable;
        impl DriverProbe for EverythingAvailable {
            fn is_available(&self, _driver: &DriverSpec) -> bool {
                true
            }
        }

        let factory = ConnectionFactory::with_probe(Box::new(EverythingAvailable));
        smol::block_on(async {
            let target = ConnectTarget::parse("mssql://").unwrap();
            let Err(err) = factory.open(&target).await else {
                panic!("expected a missing-driver error");
            };
            assert_eq!(err.error_type(), "MissingPackageError");
        });
    }
}
