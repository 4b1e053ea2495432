//! Driver-presence probing.
//!
//! Whether a driver is usable is a property of the build (which backend
//! features were compiled in), not of the connect string. The probe is a
//! trait so tests can simulate an absent driver without producing a
//! feature-stripped binary.

use super::packages::{BackendFamily, DriverSpec};

/// Answers whether a resolved driver crate is linked into this process.
///
/// Absence of the driver, and only that, is what turns a connect attempt
/// into a missing-driver error with an install hint.
pub trait DriverProbe: Send + Sync {
    fn is_available(&self, driver: &DriverSpec) -> bool;
}

/// Probe answering from the compiled Cargo feature set.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompiledDrivers;

impl DriverProbe for CompiledDrivers {
    fn is_available(&self, driver: &DriverSpec) -> bool {
        match (driver.family, driver.package) {
            (BackendFamily::Sqlite, "sqlx") => cfg!(feature = "sqlite"),
            (BackendFamily::PostgreSql, "sqlx") => cfg!(feature = "postgres"),
            (BackendFamily::MySql, "sqlx") => cfg!(feature = "mysql"),
            (BackendFamily::DuckDb, "duckdb") => cfg!(feature = "duckdb"),
            // Alternative client crates and the MSSQL/Oracle families have
            // no compiled-in driver in this build.
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_probe_tracks_features() {
        let probe = CompiledDrivers;
        let duckdb = DriverSpec {
            family: BackendFamily::DuckDb,
            package: "duckdb",
        };
        assert_eq!(probe.is_available(&duckdb), cfg!(feature = "duckdb"));
    }

    #[test]
    fn unlinked_families_are_never_available() {
        let probe = CompiledDrivers;
        for spec in [
            DriverSpec { family: BackendFamily::Mssql, package: "tiberius" },
            DriverSpec { family: BackendFamily::Oracle, package: "oracle" },
            DriverSpec { family: BackendFamily::Sqlite, package: "rusqlite" },
        ] {
            assert!(!probe.is_available(&spec));
        }
    }
}
