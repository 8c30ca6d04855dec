//! Start-condition (state) registry.
//!
//! `INITIAL` exists from construction and is always inclusive. States are
//! never removed once added; re-adding the same name is a no-op as long as
//! the exclusivity flag is unchanged (changing it is an `InvalidName` error,
//! since "redefine whether this is exclusive" is not something flex itself
//! allows either).

use crate::definitions::is_valid_identifier;
use crate::error::{Result, ScannerError};

/// Name of the implicit initial state.
pub const STATE_INITIAL: &str = "INITIAL";
/// Pseudo-state meaning "every currently-registered state".
pub const STATE_ANY: &str = "*";

/// Which state(s) a rule should be attached to at registration time.
#[derive(Debug, Clone)]
pub enum StateSpec {
    /// All currently-registered inclusive states.
    Default,
    /// Every currently-registered state (the `*` pseudo-state).
    Any,
    /// A single named state.
    One(String),
    /// A list of named states.
    Many(Vec<String>),
}

impl From<&str> for StateSpec {
    fn from(name: &str) -> Self {
        if name == STATE_ANY { StateSpec::Any } else { StateSpec::One(name.to_string()) }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StateRegistry {
    states: indexmap::IndexMap<String, bool>,
}

impl StateRegistry {
    pub(crate) fn new() -> Self {
        let mut states = indexmap::IndexMap::new();
        states.insert(STATE_INITIAL.to_string(), false);
        Self { states }
    }

    pub(crate) fn add(&mut self, name: &str, exclusive: bool) -> Result<()> {
        if name == STATE_ANY || !is_valid_identifier(name) {
            return Err(ScannerError::InvalidName(name.to_string()));
        }
        match self.states.get(name) {
            Some(existing) if *existing != exclusive => Err(ScannerError::InvalidName(name.to_string())),
            Some(_) => Ok(()),
            None => {
                self.states.insert(name.to_string(), exclusive);
                Ok(())
            }
        }
    }

    pub(crate) fn exists(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.states.keys().map(|s| s.as_str()).collect()
    }

    fn inclusive_names(&self) -> Vec<String> {
        self.states.iter().filter(|(_, excl)| !**excl).map(|(name, _)| name.clone()).collect()
    }

    /// Resolve a [`StateSpec`] into the concrete, deduplicated list of state
    /// names a rule should be attached to.
    pub(crate) fn resolve(&self, spec: &StateSpec) -> Result<Vec<String>> {
        let resolved = match spec {
            StateSpec::Default => self.inclusive_names(),
            StateSpec::Any => self.states.keys().cloned().collect(),
            StateSpec::One(name) => {
                if !self.exists(name) {
                    return Err(ScannerError::UnknownState(name.clone()));
                }
                vec![name.clone()]
            }
            StateSpec::Many(names) => {
                let mut seen = std::collections::HashSet::new();
                let mut out = Vec::new();
                for name in names {
                    if !self.exists(name) {
                        return Err(ScannerError::UnknownState(name.clone()));
                    }
                    if seen.insert(name.clone()) {
                        out.push(name.clone());
                    }
                }
                out
            }
        };

        if resolved.is_empty() { Err(ScannerError::EmptyStateSet) } else { Ok(resolved) }
    }
}
