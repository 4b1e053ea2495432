//! Static driver and dialect lookup tables.
//!
//! Two pure-data maps live here: the scheme → driver-crate table used to
//! diagnose missing drivers, and the engine-dialect → canonical-dialect
//! exception table used by dialect resolution. Both are consulted through
//! small lookup functions; neither is ever mutated.

use serde::Serialize;

/// Backend families the registry knows how to talk about.
///
/// A family groups every scheme/subdriver spelling that reaches the same
/// kind of server. Families without a compiled-in driver still resolve
/// here so their missing-driver diagnostics can name the right crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendFamily {
    PostgreSql,
    MySql,
    Sqlite,
    DuckDb,
    Mssql,
    Oracle,
}

impl BackendFamily {
    /// Resolve the family for a base scheme (subdriver already stripped).
    pub fn from_scheme(base_scheme: &str) -> Option<Self> {
        match base_scheme {
            "postgres" | "postgresql" => Some(Self::PostgreSql),
            "mysql" | "mariadb" => Some(Self::MySql),
            "sqlite" => Some(Self::Sqlite),
            "duckdb" => Some(Self::DuckDb),
            "mssql" => Some(Self::Mssql),
            "oracle" => Some(Self::Oracle),
            _ => None,
        }
    }
}

/// One resolved driver: the family it serves and the crate providing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSpec {
    pub family: BackendFamily,
    /// The installable crate name, used verbatim in missing-driver hints.
    pub package: &'static str,
}

/// Scheme/subdriver → driver crate.
///
/// The first column is the full scheme as written in the connect string.
/// Rows without a subdriver are the family defaults.
const DRIVER_PACKAGES: &[(&str, DriverSpec)] = &[
    // MySQL / MariaDB
    ("mysql", DriverSpec { family: BackendFamily::MySql, package: "sqlx" }),
    ("mysql+sqlx", DriverSpec { family: BackendFamily::MySql, package: "sqlx" }),
    ("mysql+mysql", DriverSpec { family: BackendFamily::MySql, package: "mysql" }),
    ("mysql+mysql-async", DriverSpec { family: BackendFamily::MySql, package: "mysql_async" }),
    ("mariadb", DriverSpec { family: BackendFamily::MySql, package: "sqlx" }),
    ("mariadb+mysql", DriverSpec { family: BackendFamily::MySql, package: "mysql" }),
    // PostgreSQL
    ("postgres", DriverSpec { family: BackendFamily::PostgreSql, package: "sqlx" }),
    ("postgresql", DriverSpec { family: BackendFamily::PostgreSql, package: "sqlx" }),
    ("postgresql+sqlx", DriverSpec { family: BackendFamily::PostgreSql, package: "sqlx" }),
    ("postgresql+tokio-postgres", DriverSpec { family: BackendFamily::PostgreSql, package: "tokio-postgres" }),
    ("postgresql+postgres", DriverSpec { family: BackendFamily::PostgreSql, package: "postgres" }),
    // SQLite
    ("sqlite", DriverSpec { family: BackendFamily::Sqlite, package: "sqlx" }),
    ("sqlite+rusqlite", DriverSpec { family: BackendFamily::Sqlite, package: "rusqlite" }),
    // DuckDB (embedded analytical engine)
    ("duckdb", DriverSpec { family: BackendFamily::DuckDb, package: "duckdb" }),
    // Oracle
    ("oracle", DriverSpec { family: BackendFamily::Oracle, package: "oracle" }),
    ("oracle+sibyl", DriverSpec { family: BackendFamily::Oracle, package: "sibyl" }),
    // MSSQL
    ("mssql", DriverSpec { family: BackendFamily::Mssql, package: "tiberius" }),
    ("mssql+odbc", DriverSpec { family: BackendFamily::Mssql, package: "odbc-api" }),
];

/// Look up the driver for a full scheme, falling back to the family
/// default when only the subdriver is unknown.
pub fn driver_for_scheme(scheme: &str, base_scheme: &str) -> Option<DriverSpec> {
    DRIVER_PACKAGES
        .iter()
        .find(|(s, _)| *s == scheme)
        .or_else(|| DRIVER_PACKAGES.iter().find(|(s, _)| *s == base_scheme))
        .map(|(_, spec)| *spec)
}

/// Engine-layer dialect name → canonical dialect name, for the handful of
/// backends where the two layers disagree. Everything else passes through
/// unchanged (identity fallback, applied by the dialect resolver).
pub const DIALECT_EXCEPTIONS: &[(&str, &str)] = &[
    ("postgresql", "postgres"),
    ("mssql", "tsql"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_from_scheme_covers_aliases() {
        assert_eq!(
            BackendFamily::from_scheme("postgres"),
            Some(BackendFamily::PostgreSql)
        );
        assert_eq!(
            BackendFamily::from_scheme("postgresql"),
            Some(BackendFamily::PostgreSql)
        );
        assert_eq!(BackendFamily::from_scheme("mariadb"), Some(BackendFamily::MySql));
        assert_eq!(BackendFamily::from_scheme("nosuchdb"), None);
    }

    #[test]
    fn subdriver_selects_alternative_crate() {
        let spec = driver_for_scheme("postgresql+tokio-postgres", "postgresql").unwrap();
        assert_eq!(spec.package, "tokio-postgres");
        assert_eq!(spec.family, BackendFamily::PostgreSql);
    }

    #[test]
    fn unknown_subdriver_falls_back_to_family_default() {
        let spec = driver_for_scheme("mysql+homegrown", "mysql").unwrap();
        assert_eq!(spec.package, "sqlx");
    }

    #[test]
    fn every_family_has_a_default_row() {
        for scheme in ["mysql", "mariadb", "postgresql", "sqlite", "duckdb", "oracle", "mssql"] {
            assert!(driver_for_scheme(scheme, scheme).is_some(), "{scheme}");
        }
    }

    #[test]
    fn unknown_scheme_has_no_driver() {
        assert!(driver_for_scheme("mongodb", "mongodb").is_none());
    }
}
