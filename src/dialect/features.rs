//! Dialect feature tables: identifier-quoting metadata per dialect.
//!
//! This is the registry's view of the dialect-grammar layer. A dialect
//! definition may legitimately be incomplete (no tokenizer, no identifier
//! table, an empty one) and many backends are simply unmapped. Callers
//! therefore never get an error out of this module; feature queries funnel
//! through a single `Option`-returning accessor and degrade to `false`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Tokenizer metadata for one dialect.
#[derive(Debug, Clone, Default)]
pub struct TokenizerDef {
    /// Identifier-quote symbols accepted by the dialect, opening symbol
    /// only. `None` when the grammar defines no identifier table.
    pub identifiers: Option<Vec<&'static str>>,
}

/// One dialect's feature definition.
#[derive(Debug, Clone, Default)]
pub struct DialectDef {
    /// `None` when the dialect has no tokenizer definition at all.
    pub tokenizer: Option<TokenizerDef>,
}

/// A set of dialect definitions keyed by canonical dialect name.
#[derive(Debug, Clone, Default)]
pub struct DialectFeatures {
    dialects: HashMap<String, DialectDef>,
}

impl DialectFeatures {
    /// Empty feature set; every query on it answers `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a dialect definition.
    pub fn insert(&mut self, name: impl Into<String>, def: DialectDef) -> &mut Self {
        self.dialects.insert(name.into(), def);
        self
    }

    /// Whether the dialect quotes identifiers with backticks.
    ///
    /// Fail-safe: an unknown dialect, a missing tokenizer, a missing or
    /// empty identifier table, and an identifier table without the backtick
    /// all answer `false`. Callers use this purely to pick a quoting
    /// convention, and "no backtick" is always a safe rendering fallback.
    pub fn supports_backtick(&self, dialect: &str) -> bool {
        self.backtick_lookup(dialect).unwrap_or(false)
    }

    // The whole fallible lookup chain lives here so the fail-safe policy
    // exists in exactly one place.
    fn backtick_lookup(&self, dialect: &str) -> Option<bool> {
        let identifiers = self
            .dialects
            .get(dialect)?
            .tokenizer
            .as_ref()?
            .identifiers
            .as_ref()?;
        if identifiers.is_empty() {
            return None;
        }
        Some(identifiers.contains(&"`"))
    }

    /// The built-in feature table for the dialects this crate ships.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<DialectFeatures> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut features = Self::new();
            features
                .insert("mysql", with_identifiers(&["`"]))
                .insert("sqlite", with_identifiers(&["\"", "`", "["]))
                .insert("postgres", with_identifiers(&["\""]))
                .insert("duckdb", with_identifiers(&["\""]))
                .insert("tsql", with_identifiers(&["\"", "["]))
                .insert("oracle", with_identifiers(&["\""]));
            features
        })
    }
}

fn with_identifiers(symbols: &[&'static str]) -> DialectDef {
    DialectDef {
        tokenizer: Some(TokenizerDef {
            identifiers: Some(symbols.to_vec()),
        }),
    }
}
