//! The scan driver: one pass of select → act → dispatch (`SPEC_FULL.md` §4.4).

use log::trace;

use super::selector::select;
use crate::scanner::Scanner;
use crate::trace::TraceRecord;

/// Result of a single `run_pass` call.
pub(crate) enum DriverOutcome<T> {
    /// An action consumed input but produced no token; the caller should
    /// call `run_pass` again.
    Continue,
    /// A token was produced.
    Token(T),
    /// End of input was reached with nothing left to refill it.
    Eof,
}

/// Run exactly one select/act pass, implementing `SPEC_FULL.md` §4.4.
pub(crate) fn run_pass<T>(scanner: &mut Scanner<T>) -> DriverOutcome<T> {
    if scanner.terminated {
        return DriverOutcome::Eof;
    }

    let was_eof = scanner.index >= scanner.source.len();

    let rules = scanner.rule_table.rules_for_state(&scanner.state);
    let selection = select(rules, &scanner.source, scanner.index, &scanner.rejected);
    let rule = selection
        .and_then(|sel| rules.iter().find(|r| r.registration_index == sel.registration_index))
        .cloned();

    if let (Some(sel), Some(rule)) = (&selection, &rule) {
        let matched_text = scanner.source.get(sel.start..sel.end).unwrap_or("");
        trace!("select state={} pattern={} matched={:?}", scanner.state, rule.display, matched_text);
        if scanner.debug_enabled {
            let record = TraceRecord {
                state: scanner.state.clone(),
                pattern_source: rule.display.clone(),
                matched_text: matched_text.to_string(),
            };
            (scanner.trace_sink)(&record);
        }
        scanner.last_rule_index = Some(sel.registration_index);
    }

    // Resolve `text` carry-over from a previous `more()`.
    if scanner.read_more {
        scanner.read_more = false;
    } else {
        scanner.text.clear();
    }

    let Some(sel) = selection else {
        if !was_eof {
            // No rule matched: default echo consumes exactly one character.
            let ch = scanner.source[scanner.index..].chars().next().expect("index is not at end of input");
            scanner.text.push(ch);
            scanner.index += ch.len_utf8();
            scanner.echo();
            return DriverOutcome::Continue;
        }
        scanner.text.clear();
        scanner.terminated = true;
        return DriverOutcome::Eof;
    };

    let matched = scanner.source.get(sel.start..sel.end).unwrap_or("").to_string();
    scanner.text.push_str(&matched);
    // `sel.end` is already the absolute offset past this match; using it
    // (rather than `sel.start + text.len()`) keeps `more()`'s carry-over
    // from inflating the advance.
    scanner.index = sel.end;

    let rejected_before = scanner.rejected.len();
    let result = match &rule {
        Some(rule) => match rule.action.clone() {
            Some(action) => action(scanner),
            None => {
                scanner.discard();
                None
            }
        },
        None => {
            scanner.discard();
            None
        }
    };

    if scanner.rejected.len() > rejected_before {
        // `reject()` rewound the cursor; retry selection with it excluded.
        return DriverOutcome::Continue;
    }
    scanner.rejected.clear();

    // An explicit `terminate()` call inside the action always wins, regardless
    // of whatever `Option<T>` the action closure itself returned.
    if scanner.terminated {
        return DriverOutcome::Eof;
    }

    if was_eof {
        let refilled = scanner.index < scanner.source.len();
        if !refilled {
            scanner.terminated = true;
            return DriverOutcome::Eof;
        }
    }

    match result {
        Some(token) => DriverOutcome::Token(token),
        None => DriverOutcome::Continue,
    }
}
