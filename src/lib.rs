//! A runtime-configurable lexical scanner modeled after the classic flex
//! tool: a caller declares named sub-expressions, start conditions, and
//! rules (pattern + action), and the engine drives longest-match selection
//! over an in-memory input string, invoking the caller's actions and
//! yielding tokens.
//!
//! ```
//! use std::rc::Rc;
//! use flexor::{Action, PatternSource, Scanner};
//!
//! let mut scanner: Scanner<String> = Scanner::new();
//! scanner.add_definition("DIGIT", "[0-9]").unwrap();
//! let emit_number: Action<String> = Rc::new(|s: &mut Scanner<String>| Some(s.text().to_string()));
//! scanner
//!     .add_rule(PatternSource::Regex { source: "{DIGIT}+".into(), flags: "".into() }, Some(emit_number))
//!     .unwrap();
//! scanner.add_rule(PatternSource::Regex { source: r"\s+".into(), flags: "".into() }, None).unwrap();
//! scanner.set_source("12 34");
//! assert_eq!(scanner.lex_all(), vec!["12", "34"]);
//! ```

mod definitions;
mod engine;
mod error;
mod pattern;
mod rule;
mod states;
mod trace;

mod actions;
mod scanner;

pub use error::{Result, ScannerError};
pub use pattern::PatternSource;
pub use rule::{Action, RULE_EOF};
pub use scanner::{RuleSpec, Scanner, Yield};
pub use states::{STATE_ANY, STATE_INITIAL, StateSpec};
pub use trace::{EchoSink, TraceRecord, TraceSink};
