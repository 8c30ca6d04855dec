//! Named regex-fragment definitions (`{name}` substitutions).
//!
//! Definitions are textual: `add_definition("DIGIT", "[0-9]")` followed by a
//! rule pattern `"{DIGIT}+"` expands, at rule-compile time, to `"(?:[0-9])+"`.
//! They carry no flags of their own and are immutable once registered.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScannerError};

static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

/// Returns `true` when `name` matches the identifier grammar `[A-Za-z_][A-Za-z0-9_-]*`.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    IDENT_RE.is_match(name)
}

/// Registry of named regex fragments, keyed in registration order.
#[derive(Debug, Default, Clone)]
pub(crate) struct Definitions {
    entries: indexmap::IndexMap<String, String>,
}

impl Definitions {
    pub(crate) fn new() -> Self {
        Self { entries: indexmap::IndexMap::new() }
    }

    pub(crate) fn add(&mut self, name: &str, pattern: &str) -> Result<()> {
        if !is_valid_identifier(name) {
            return Err(ScannerError::InvalidName(name.to_string()));
        }
        if pattern.is_empty() {
            return Err(ScannerError::EmptyPattern);
        }
        self.entries.insert(name.to_string(), pattern.to_string());
        Ok(())
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|s| s.as_str())
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }
}
