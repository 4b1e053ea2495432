//! Dialect resolution: canonical names and feature queries.
//!
//! The engine layer and the dialect-feature layer mostly agree on dialect
//! names; the exceptions live in a static table with an identity fallback
//! for everything unmapped.

mod features;

pub use features::{DialectDef, DialectFeatures, TokenizerDef};

use crate::drivers::packages::DIALECT_EXCEPTIONS;

/// Map an engine-layer dialect name to its canonical feature-layer name.
///
/// Names without an exception entry pass through unchanged.
pub fn canonicalize(raw: &str) -> String {
    canonicalize_with(raw, DIALECT_EXCEPTIONS)
}

/// Exception-table lookup with identity fallback.
pub fn canonicalize_with(raw: &str, exceptions: &[(&str, &str)]) -> String {
    exceptions
        .iter()
        .find(|(engine_name, _)| *engine_name == raw)
        .map_or_else(|| raw.to_string(), |(_, canonical)| (*canonical).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_entries_are_mapped() {
        assert_eq!(canonicalize("postgresql"), "postgres");
        assert_eq!(canonicalize("mssql"), "tsql");
    }

    #[test]
    fn unmapped_names_pass_through() {
        assert_eq!(canonicalize("duckdb"), "duckdb");
        assert_eq!(canonicalize("mysql"), "mysql");
    }

    #[test]
    fn custom_exception_table() {
        let exceptions = &[("engine_mock_dialect_name", "feature_mock_dialect")];
        assert_eq!(
            canonicalize_with("engine_mock_dialect_name", exceptions),
            "feature_mock_dialect"
        );
        assert_eq!(
            canonicalize_with("only_known_to_engine_layer", exceptions),
            "only_known_to_engine_layer"
        );
    }
}
