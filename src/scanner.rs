//! The scanner: configuration surface, runtime state, and the public
//! driving methods (`lex`/`lex_all`). See `SPEC_FULL.md` §6.

use std::collections::HashSet;

use log::debug;

use crate::definitions::Definitions;
use crate::engine::{self, DriverOutcome, RuleTable};
use crate::error::Result;
use crate::pattern::{self, PatternSource};
use crate::rule::{Action, RULE_EOF};
use crate::states::{STATE_INITIAL, StateRegistry, StateSpec};
use crate::trace::{EchoSink, TraceRecord, TraceSink};

/// What a completed `lex()` call produced.
#[derive(Debug)]
pub enum Yield<T> {
    /// A token produced by a user action.
    Token(T),
    /// End of input, with no rule able to refill the buffer.
    Eof,
}

impl<T> Yield<T> {
    /// Returns the token, if this is [`Yield::Token`].
    pub fn token(self) -> Option<T> {
        match self {
            Yield::Token(t) => Some(t),
            Yield::Eof => None,
        }
    }

    /// Returns `true` for [`Yield::Eof`].
    pub fn is_eof(&self) -> bool {
        matches!(self, Yield::Eof)
    }
}

/// A single rule declaration, for the batch `add_rules`/`add_state_rules`
/// entry points.
pub struct RuleSpec<T> {
    pub pattern: PatternSource,
    pub action: Option<Action<T>>,
}

/// A runtime-configurable lexical scanner.
///
/// Construct with [`Scanner::new`], declare definitions/states/rules, call
/// [`Scanner::set_source`], then drive with [`Scanner::lex`] or
/// [`Scanner::lex_all`].
pub struct Scanner<T> {
    // --- configuration -------------------------------------------------
    pub(crate) definitions: Definitions,
    pub(crate) states: StateRegistry,
    pub(crate) rule_table: RuleTable<T>,
    pub(crate) ignore_case: bool,
    pub(crate) debug_enabled: bool,
    pub(crate) echo_sink: EchoSink,
    pub(crate) trace_sink: TraceSink,

    // --- runtime ---------------------------------------------------------
    pub(crate) source: String,
    pub(crate) index: usize,
    pub(crate) text: String,
    pub(crate) state: String,
    pub(crate) state_stack: Vec<String>,
    pub(crate) read_more: bool,
    pub(crate) rejected: HashSet<usize>,
    pub(crate) last_rule_index: Option<usize>,
    pub(crate) terminated: bool,
}

impl<T> Default for Scanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scanner<T> {
    /// Build an empty scanner: only `INITIAL` registered, no rules, no
    /// source, ECHO/trace sinks both no-ops.
    pub fn new() -> Self {
        Self {
            definitions: Definitions::new(),
            states: StateRegistry::new(),
            rule_table: RuleTable::new(),
            ignore_case: false,
            debug_enabled: false,
            echo_sink: Box::new(|_| {}),
            trace_sink: Box::new(|_| {}),
            source: String::new(),
            index: 0,
            text: String::new(),
            state: STATE_INITIAL.to_string(),
            state_stack: Vec::new(),
            read_more: false,
            rejected: HashSet::new(),
            last_rule_index: None,
            terminated: false,
        }
    }

    // --- options ---------------------------------------------------------

    /// Scanner-wide case-insensitivity default; a pattern's own `i` flag
    /// always wins.
    pub fn set_ignore_case(&mut self, ignore_case: bool) {
        self.ignore_case = ignore_case;
    }

    /// Whether successful selections are also reported to the trace sink.
    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }

    /// Install the ECHO sink. The core never writes to stdout/stderr itself.
    pub fn set_echo_sink(&mut self, sink: impl FnMut(&str) + 'static) {
        self.echo_sink = Box::new(sink);
    }

    /// Install the trace sink, used only when [`Scanner::set_debug_enabled`]
    /// is on.
    pub fn set_trace_sink(&mut self, sink: impl FnMut(&TraceRecord) + 'static) {
        self.trace_sink = Box::new(sink);
    }

    // --- declarations ------------------------------------------------------

    /// Declare a named regex fragment, expandable as `{name}` in later
    /// rule patterns.
    pub fn add_definition(&mut self, name: &str, pattern: &str) -> Result<()> {
        debug!("add_definition name={name} pattern={pattern}");
        self.definitions.add(name, pattern)
    }

    /// Register a start condition. Idempotent if re-added with the same
    /// exclusivity.
    pub fn add_state(&mut self, name: &str, exclusive: bool) -> Result<()> {
        debug!("add_state name={name} exclusive={exclusive}");
        self.states.add(name, exclusive)
    }

    // --- rules ---------------------------------------------------------

    /// Register a rule active in every currently-registered inclusive state.
    pub fn add_rule(&mut self, pattern: PatternSource, action: Option<Action<T>>) -> Result<()> {
        self.add_state_rule(StateSpec::Default, pattern, action)
    }

    /// Register several rules active in every currently-registered
    /// inclusive state, in order.
    pub fn add_rules(&mut self, rules: Vec<RuleSpec<T>>) -> Result<()> {
        for rule in rules {
            self.add_rule(rule.pattern, rule.action)?;
        }
        Ok(())
    }

    /// Register a rule for a specific state, the `*` pseudo-state, or a
    /// list of states (see [`StateSpec`]).
    pub fn add_state_rule(&mut self, spec: StateSpec, pattern: PatternSource, action: Option<Action<T>>) -> Result<()> {
        let resolved_states = self.states.resolve(&spec)?;
        let raw = pattern_raw_text(&pattern);

        if raw == RULE_EOF {
            let index = self.rule_table.add(&resolved_states, None, true, action, RULE_EOF.to_string());
            debug!("add_state_rule eof states={resolved_states:?} index={index}");
            return Ok(());
        }

        let compiled = pattern::compile_pattern(&pattern, &self.definitions, self.ignore_case)?;
        let display = compiled.display.clone();
        let index = self.rule_table.add(&resolved_states, Some(compiled), false, action, display.clone());
        debug!("add_state_rule pattern={display} states={resolved_states:?} index={index}");
        Ok(())
    }

    /// Register several rules for the same state spec, in order.
    pub fn add_state_rules(&mut self, spec: StateSpec, rules: Vec<RuleSpec<T>>) -> Result<()> {
        for rule in rules {
            self.add_state_rule(spec.clone(), rule.pattern, rule.action)?;
        }
        Ok(())
    }

    // --- input -----------------------------------------------------------

    /// Install a new input string and reset the cursor, but not the
    /// scanner's state/stack (mirrors `restart`).
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.index = 0;
        self.text.clear();
        self.read_more = false;
        self.rejected.clear();
        self.last_rule_index = None;
        self.terminated = false;
    }

    /// Reset all configuration: definitions, states (back to just
    /// `INITIAL`), and rules. Runtime state is also reset.
    pub fn clear(&mut self) {
        self.definitions = Definitions::new();
        self.states = StateRegistry::new();
        self.rule_table = RuleTable::new();
        self.reset();
    }

    /// Reset runtime state only (cursor, buffer, stack, flags); keeps all
    /// configuration and the current source text.
    pub fn reset(&mut self) {
        self.index = 0;
        self.text.clear();
        self.state = STATE_INITIAL.to_string();
        self.state_stack.clear();
        self.read_more = false;
        self.rejected.clear();
        self.last_rule_index = None;
        self.terminated = false;
    }

    // --- driving -----------------------------------------------------------

    /// Run passes until a token is produced or EOF is reached.
    pub fn lex(&mut self) -> Yield<T> {
        loop {
            match engine::run_pass(self) {
                DriverOutcome::Continue => continue,
                DriverOutcome::Token(token) => return Yield::Token(token),
                DriverOutcome::Eof => return Yield::Eof,
            }
        }
    }

    /// Drive [`Scanner::lex`] to completion, collecting every token.
    pub fn lex_all(&mut self) -> Vec<T> {
        let mut out = Vec::new();
        loop {
            match self.lex() {
                Yield::Token(token) => out.push(token),
                Yield::Eof => break,
            }
        }
        out
    }

    // --- runtime-visible accessors -----------------------------------------

    /// The current token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The active start condition.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The cursor: byte offset into [`Scanner::source`] of the next match.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current input string (mutable via `unput`/`restart`).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether [`Scanner::terminate`] has been called since the last
    /// `restart`/`set_source`.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    // --- introspection (supplemental) ---------------------------------------

    /// Names of every registered definition, in registration order.
    pub fn definition_names(&self) -> Vec<&str> {
        self.definitions.names()
    }

    /// Names of every registered state, in registration order.
    pub fn state_names(&self) -> Vec<&str> {
        self.states.names()
    }

    /// Number of rules active in `state` (including ones shared in via `*`
    /// or an explicit list).
    pub fn rule_count_for_state(&self, state: &str) -> usize {
        self.rule_table.rule_count_for_state(state)
    }
}

fn pattern_raw_text(pattern: &PatternSource) -> &str {
    match pattern {
        PatternSource::Literal(s) => s,
        PatternSource::Regex { source, .. } => source,
    }
}

impl<T> std::fmt::Debug for Scanner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("state", &self.state)
            .field("index", &self.index)
            .field("text", &self.text)
            .field("terminated", &self.terminated)
            .field("state_stack", &self.state_stack)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scanner_has_only_initial_state() {
        let scanner: Scanner<()> = Scanner::new();
        assert_eq!(scanner.state(), STATE_INITIAL);
        assert_eq!(scanner.state_names(), vec![STATE_INITIAL]);
    }

    #[test]
    fn set_source_resets_runtime_but_not_config() {
        let mut scanner: Scanner<()> = Scanner::new();
        scanner.add_state("comment", true).unwrap();
        scanner.set_source("abc");
        assert_eq!(scanner.index(), 0);
        assert_eq!(scanner.state_names().len(), 2);
    }

    #[test]
    fn clear_resets_configuration() {
        let mut scanner: Scanner<()> = Scanner::new();
        scanner.add_state("comment", true).unwrap();
        scanner.add_definition("DIGIT", "[0-9]").unwrap();
        scanner.clear();
        assert_eq!(scanner.state_names(), vec![STATE_INITIAL]);
        assert!(scanner.definition_names().is_empty());
    }

    #[test]
    fn eof_rule_via_sentinel_pattern() {
        let mut scanner: Scanner<i32> = Scanner::new();
        scanner.add_state_rule(StateSpec::Default, PatternSource::Literal(RULE_EOF.to_string()), None).unwrap();
        assert_eq!(scanner.rule_count_for_state(STATE_INITIAL), 1);
    }
}
