//! Pattern compilation: literal/regex normalization, `{name}` expansion,
//! anchor detection, and the anchored-at-offset matcher used by the
//! selector.
//!
//! See `SPEC_FULL.md` §4.1 for the step-by-step algorithm this module
//! implements.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::definitions::Definitions;
use crate::error::{Result, ScannerError};

/// A pattern as supplied by the caller, before compilation.
#[derive(Debug, Clone)]
pub enum PatternSource {
    /// Matched literally (all regex metacharacters are escaped).
    Literal(String),
    /// Matched as a regex. `flags` may contain only `i` (case-insensitive)
    /// and `u` (unicode), in any combination.
    Regex { source: String, flags: String },
}

impl PatternSource {
    fn raw(&self) -> &str {
        match self {
            PatternSource::Literal(s) => s,
            PatternSource::Regex { source, .. } => source,
        }
    }
}

static DEFINITION_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_-]*)\}").unwrap());

bitflags::bitflags! {
    /// Recognized regex pattern flags: `i` (case-insensitive) and `u` (unicode).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct PatternFlags: u8 {
        const CASE_INSENSITIVE = 1 << 0;
        const UNICODE = 1 << 1;
    }
}

fn parse_flags(flags: &str, source: &str) -> Result<PatternFlags> {
    let mut parsed = PatternFlags::empty();
    for flag in flags.chars() {
        parsed |= match flag {
            'i' => PatternFlags::CASE_INSENSITIVE,
            'u' => PatternFlags::UNICODE,
            other => {
                return Err(ScannerError::InvalidPattern {
                    pattern: source.to_string(),
                    reason: format!("unsupported flag `{other}`"),
                });
            }
        };
    }
    Ok(parsed)
}

/// A compiled pattern, ready to be evaluated at an absolute input offset.
pub(crate) struct CompiledPattern {
    regex: Regex,
    pub(crate) has_bol: bool,
    pub(crate) has_eol: bool,
    pub(crate) fixed_width: Option<usize>,
    pub(crate) display: String,
}

impl std::fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("display", &self.display)
            .field("has_bol", &self.has_bol)
            .field("has_eol", &self.has_eol)
            .field("fixed_width", &self.fixed_width)
            .finish()
    }
}

impl CompiledPattern {
    /// Find the longest match that begins exactly at `offset`, or `None`.
    ///
    /// Realized with the engine's "find the next match at-or-after offset"
    /// primitive, keeping a match only when it starts exactly at `offset` —
    /// this lets `^`/`$` see the whole input (for multi-line lookbehind/ahead)
    /// instead of a disconnected slice.
    pub(crate) fn match_at(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let m = self.regex.find_at(text, offset)?;
        if m.start() == offset { Some((m.start(), m.end())) } else { None }
    }
}

/// Expand every `{name}` occurrence in `source` using `definitions`. The
/// name lookup is case-insensitive; an undefined name is left verbatim
/// (documented caller responsibility — see SPEC_FULL.md §4.1 step 3).
fn expand_definitions(source: &str, definitions: &Definitions) -> String {
    DEFINITION_REF_RE
        .replace_all(source, |caps: &regex::Captures| {
            let name = &caps[1];
            let found = definitions
                .names()
                .into_iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(name))
                .and_then(|candidate| definitions.get(candidate));
            match found {
                Some(def) => format!("(?:{def})"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn detect_anchors(raw: &str) -> (bool, bool) {
    let has_bol = raw.starts_with('^');
    let has_eol = raw.ends_with('$') && !raw.ends_with("\\$");
    (has_bol, has_eol)
}

/// Compile `input` into a [`CompiledPattern`]. `scanner_ignore_case` is the
/// scanner-wide default; a regex pattern's own `i` flag always wins.
pub(crate) fn compile_pattern(
    input: &PatternSource,
    definitions: &Definitions,
    scanner_ignore_case: bool,
) -> Result<CompiledPattern> {
    if input.raw().is_empty() {
        return Err(ScannerError::EmptyPattern);
    }

    match input {
        PatternSource::Literal(lit) => {
            let escaped = regex::escape(lit);
            let fixed_width = Some(lit.len());
            let mut builder = RegexBuilder::new(&escaped);
            builder.case_insensitive(scanner_ignore_case).multi_line(true);
            let regex = builder
                .build()
                .map_err(|e| ScannerError::InvalidPattern { pattern: lit.clone(), reason: e.to_string() })?;
            Ok(CompiledPattern { regex, has_bol: false, has_eol: false, fixed_width, display: lit.clone() })
        }
        PatternSource::Regex { source, flags } => {
            // `u` is accepted for parity with flex/regex flag strings but unicode
            // mode is already always on, so only validity is checked here.
            let parsed_flags = parse_flags(flags, source)?;
            let ignore_case = scanner_ignore_case || parsed_flags.contains(PatternFlags::CASE_INSENSITIVE);
            let unicode = true;

            let (has_bol, has_eol) = detect_anchors(source);
            let expanded = expand_definitions(source, definitions);

            let mut builder = RegexBuilder::new(&expanded);
            builder.case_insensitive(ignore_case).unicode(unicode).multi_line(true);
            let regex = builder
                .build()
                .map_err(|e| ScannerError::InvalidPattern { pattern: source.clone(), reason: e.to_string() })?;

            Ok(CompiledPattern { regex, has_bol, has_eol, fixed_width: None, display: source.clone() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Definitions {
        let mut d = Definitions::new();
        d.add("DIGIT", "[0-9]").unwrap();
        d
    }

    #[test]
    fn literal_matches_only_at_exact_offset() {
        let p = compile_pattern(&PatternSource::Literal("ab".into()), &defs(), false).unwrap();
        assert_eq!(p.match_at("xxabxx", 2), Some((2, 4)));
        assert_eq!(p.match_at("xxabxx", 0), None);
        assert_eq!(p.fixed_width, Some(2));
        assert!(!p.has_bol && !p.has_eol);
    }

    #[test]
    fn definition_expansion() {
        let p = compile_pattern(&PatternSource::Regex { source: "{DIGIT}+".into(), flags: "".into() }, &defs(), false)
            .unwrap();
        assert_eq!(p.match_at("12a", 0), Some((0, 2)));
    }

    #[test]
    fn undefined_definition_left_verbatim() {
        // `{NOPE}` has no matching definition, so it passes through untouched;
        // `{` not followed by a valid repetition count is literal in `regex`.
        let p =
            compile_pattern(&PatternSource::Regex { source: "{NOPE}x".into(), flags: "".into() }, &defs(), false)
                .unwrap();
        assert_eq!(p.match_at("{NOPE}x", 0), Some((0, 7)));
    }

    #[test]
    fn anchors_detected_only_at_extremes() {
        let p = compile_pattern(&PatternSource::Regex { source: "^abc$".into(), flags: "".into() }, &defs(), false)
            .unwrap();
        assert!(p.has_bol && p.has_eol);
    }

    #[test]
    fn bol_true_after_newline() {
        let p = compile_pattern(&PatternSource::Regex { source: "^b".into(), flags: "".into() }, &defs(), false)
            .unwrap();
        assert_eq!(p.match_at("a\nb", 2), Some((2, 3)));
        assert_eq!(p.match_at("ab", 1), None);
    }

    #[test]
    fn rejects_unknown_flag() {
        let err =
            compile_pattern(&PatternSource::Regex { source: "a".into(), flags: "x".into() }, &defs(), false).unwrap_err();
        assert!(matches!(err, ScannerError::InvalidPattern { .. }));
    }

    #[test]
    fn rejects_empty_pattern() {
        let err = compile_pattern(&PatternSource::Literal(String::new()), &defs(), false).unwrap_err();
        assert_eq!(err, ScannerError::EmptyPattern);
    }
}
