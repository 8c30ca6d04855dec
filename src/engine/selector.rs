//! Longest-match rule selection (`SPEC_FULL.md` §4.3).

use std::collections::HashSet;
use std::rc::Rc;

use crate::rule::Rule;

/// The outcome of a successful selection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Selection {
    pub(crate) registration_index: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) is_eof: bool,
}

/// Select the best rule for `rules` (a single state's ordered list) at
/// `index` into `input`, skipping anything in `rejected`.
///
/// At end of input, the first non-rejected EOF rule wins outright. Otherwise
/// every non-EOF rule is evaluated anchored at `index`; the winner is the one
/// with the greatest effective length (raw match length plus one per
/// satisfied anchor), ties broken by earliest registration.
pub(crate) fn select<T>(rules: &[Rc<Rule<T>>], input: &str, index: usize, rejected: &HashSet<usize>) -> Option<Selection> {
    let at_eof = index >= input.len();

    if at_eof {
        return rules
            .iter()
            .filter(|r| r.is_eof && !rejected.contains(&r.registration_index))
            .min_by_key(|r| r.registration_index)
            .map(|r| Selection { registration_index: r.registration_index, start: index, end: index, is_eof: true });
    }

    let mut best: Option<(Selection, usize)> = None;

    for rule in rules {
        if rule.is_eof || rejected.contains(&rule.registration_index) {
            continue;
        }

        let best_len = best.as_ref().map(|(_, len)| *len).unwrap_or(0);
        if let Some(fixed) = rule.fixed_width() {
            if best.is_some() && fixed <= best_len {
                continue;
            }
        }

        let Some(matcher) = &rule.matcher else { continue };
        let Some((start, end)) = matcher.match_at(input, index) else { continue };

        let raw_len = end - start;
        let bonus = usize::from(rule.has_bol()) + usize::from(rule.has_eol());
        let effective_len = raw_len + bonus;

        let replace = match &best {
            None => true,
            Some((_, current_best)) => effective_len > *current_best,
        };

        if replace {
            best = Some((
                Selection { registration_index: rule.registration_index, start, end, is_eof: false },
                effective_len,
            ));
        }
    }

    best.map(|(selection, _)| selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::pattern::{PatternSource, compile_pattern};
    use crate::definitions::Definitions;

    fn rule<T>(index: usize, pattern: &str) -> Result<Rc<Rule<T>>> {
        let defs = Definitions::new();
        let matcher = compile_pattern(&PatternSource::Regex { source: pattern.into(), flags: "".into() }, &defs, false)?;
        Ok(Rc::new(Rule { matcher: Some(matcher), is_eof: false, action: None, registration_index: index, display: pattern.into() }))
    }

    #[test]
    fn longest_match_wins() {
        let rules = vec![rule::<()>(0, "a").unwrap(), rule::<()>(1, "abc").unwrap()];
        let sel = select(&rules, "abcd", 0, &HashSet::new()).unwrap();
        assert_eq!((sel.start, sel.end), (0, 3));
        assert_eq!(sel.registration_index, 1);
    }

    #[test]
    fn earlier_registration_wins_tie() {
        let rules = vec![rule::<()>(0, "a|b").unwrap(), rule::<()>(1, "[ab]").unwrap()];
        let sel = select(&rules, "a", 0, &HashSet::new()).unwrap();
        assert_eq!(sel.registration_index, 0);
    }

    #[test]
    fn anchor_bonus_breaks_tie() {
        let rules = vec![rule::<()>(0, "a").unwrap(), rule::<()>(1, "^a").unwrap()];
        let sel = select(&rules, "a", 0, &HashSet::new()).unwrap();
        assert_eq!(sel.registration_index, 1);
    }

    #[test]
    fn rejected_rule_is_skipped() {
        let rules = vec![rule::<()>(0, "abc").unwrap(), rule::<()>(1, "a").unwrap()];
        let mut rejected = HashSet::new();
        rejected.insert(0);
        let sel = select(&rules, "abc", 0, &rejected).unwrap();
        assert_eq!(sel.registration_index, 1);
    }

    #[test]
    fn no_match_returns_none() {
        let rules = vec![rule::<()>(0, "xyz").unwrap()];
        assert!(select(&rules, "abc", 0, &HashSet::new()).is_none());
    }
}
