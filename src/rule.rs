//! Compiled rule records.
//!
//! A [`Rule`] is shared (via `Rc`) across every state it was registered
//! into, so a `*`/list registration compiles the pattern and boxes the
//! action closure exactly once. See `SPEC_FULL.md` §3 and §9
//! ("Cross-state shared rule records").

use std::rc::Rc;

use crate::pattern::CompiledPattern;

/// String sentinel accepted wherever a pattern is expected, meaning "this
/// rule's action runs when the scanner reaches end of input in this state".
pub const RULE_EOF: &str = "<<EOF>>";

/// A user action: a callable closure that receives `&mut Scanner<T>` and
/// returns `None` (continue scanning) or `Some(token)`.
pub type Action<T> = Rc<dyn Fn(&mut crate::Scanner<T>) -> Option<T>>;

pub(crate) struct Rule<T> {
    pub(crate) matcher: Option<CompiledPattern>,
    pub(crate) is_eof: bool,
    pub(crate) action: Option<Action<T>>,
    pub(crate) registration_index: usize,
    pub(crate) display: String,
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("display", &self.display)
            .field("is_eof", &self.is_eof)
            .field("registration_index", &self.registration_index)
            .field("action", &self.action.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<T> Rule<T> {
    pub(crate) fn has_bol(&self) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.has_bol)
    }

    pub(crate) fn has_eol(&self) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.has_eol)
    }

    pub(crate) fn fixed_width(&self) -> Option<usize> {
        self.matcher.as_ref().and_then(|m| m.fixed_width)
    }
}
