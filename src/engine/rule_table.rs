//! Per-state ordered rule lists.
//!
//! `RuleTable` owns the scanner-global `registration_index` counter and the
//! mapping from state name to that state's ordered rule list. A rule shared
//! across several states (via `*` or an explicit list) is pushed as a clone
//! of the same `Rc` into each of those lists, so the tie-break stays
//! globally well-defined (see `SPEC_FULL.md` §9).

use std::collections::HashMap;
use std::rc::Rc;

use crate::pattern::CompiledPattern;
use crate::rule::{Action, Rule};

pub(crate) struct RuleTable<T> {
    by_state: HashMap<String, Vec<Rc<Rule<T>>>>,
    next_index: usize,
}

impl<T> RuleTable<T> {
    pub(crate) fn new() -> Self {
        Self { by_state: HashMap::new(), next_index: 0 }
    }

    /// Register a compiled rule for every state in `states`, sharing the
    /// same underlying record. Returns the assigned registration index.
    pub(crate) fn add(
        &mut self,
        states: &[String],
        matcher: Option<CompiledPattern>,
        is_eof: bool,
        action: Option<Action<T>>,
        display: String,
    ) -> usize {
        let index = self.next_index;
        self.next_index += 1;

        let rule = Rc::new(Rule { matcher, is_eof, action, registration_index: index, display });
        for state in states {
            self.by_state.entry(state.clone()).or_default().push(Rc::clone(&rule));
        }
        index
    }

    pub(crate) fn rules_for_state(&self, state: &str) -> &[Rc<Rule<T>>] {
        self.by_state.get(state).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn rule_count_for_state(&self, state: &str) -> usize {
        self.rules_for_state(state).len()
    }
}

impl<T> std::fmt::Debug for RuleTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("states", &self.by_state.keys().collect::<Vec<_>>())
            .field("next_index", &self.next_index)
            .finish()
    }
}
