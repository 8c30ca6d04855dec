//! The Action API: the callable surface user actions drive the scanner
//! through (`SPEC_FULL.md` §4.5).

use crate::error::{Result, ScannerError};
use crate::scanner::Scanner;
use crate::states::STATE_INITIAL;

impl<T> Scanner<T> {
    /// Explicit no-op. The driver treats an absent action the same way, so
    /// this exists purely so a rule's action body can end with it for
    /// clarity.
    pub fn discard(&mut self) {}

    /// Write the current token text to the ECHO sink.
    pub fn echo(&mut self) {
        (self.echo_sink)(&self.text);
    }

    /// Rewind the cursor by `text.len()` and exclude the rule that just
    /// matched from the next selection pass at this position.
    pub fn reject(&mut self) {
        let Some(index) = self.last_rule_index else { return };
        self.index -= self.text.len();
        self.rejected.insert(index);
    }

    /// Carry `text` over into the next match instead of replacing it.
    pub fn more(&mut self) {
        self.read_more = true;
    }

    /// Shrink the matched text to its first `n` bytes, rewinding the cursor
    /// to match. `n` must land on a char boundary.
    pub fn less(&mut self, n: usize) {
        if n < self.text.len() {
            self.index -= self.text.len() - n;
            self.text.truncate(n);
        }
    }

    /// Splice `s` into the input at the current cursor, so it is read next.
    pub fn unput(&mut self, s: &str) {
        self.source.insert_str(self.index, s);
    }

    /// Read up to `n` chars (at least 1, default 1) from the cursor,
    /// advancing it, and return them. Shorter (possibly empty) at end of
    /// input.
    pub fn input(&mut self, n: Option<usize>) -> String {
        let n = n.unwrap_or(1).max(1);
        let mut end = self.index;
        let mut read = 0;
        for (offset, ch) in self.source[self.index..].char_indices() {
            if read >= n {
                break;
            }
            end = self.index + offset + ch.len_utf8();
            read += 1;
        }
        let taken = self.source[self.index..end].to_string();
        self.index = end;
        taken
    }

    /// Set the active start condition (default `INITIAL` when `None`).
    pub fn begin(&mut self, state: Option<&str>) -> Result<()> {
        let target = state.unwrap_or(STATE_INITIAL);
        if !self.states.exists(target) {
            return Err(ScannerError::UnknownState(target.to_string()));
        }
        self.state = target.to_string();
        Ok(())
    }

    /// Alias for [`Scanner::begin`].
    pub fn switch_state(&mut self, state: Option<&str>) -> Result<()> {
        self.begin(state)
    }

    /// Push the current state onto the stack, then switch to `state`.
    pub fn push_state(&mut self, state: &str) -> Result<()> {
        if !self.states.exists(state) {
            return Err(ScannerError::UnknownState(state.to_string()));
        }
        self.state_stack.push(self.state.clone());
        self.state = state.to_string();
        Ok(())
    }

    /// Pop the state stack and switch to the popped state.
    pub fn pop_state(&mut self) -> Result<()> {
        match self.state_stack.pop() {
            Some(state) => {
                self.state = state;
                Ok(())
            }
            None => Err(ScannerError::StackUnderflow),
        }
    }

    /// The top of the state stack, without mutating it.
    pub fn top_state(&self) -> Option<&str> {
        self.state_stack.last().map(|s| s.as_str())
    }

    /// Stop scanning: clears the in-flight token/reject bookkeeping and
    /// makes every subsequent `lex()` call report EOF until `restart` or
    /// `set_source` runs. Leaves `source`/`index`/`state`/`state_stack`
    /// untouched.
    pub fn terminate(&mut self) {
        self.text.clear();
        self.rejected.clear();
        self.read_more = false;
        self.last_rule_index = None;
        self.terminated = true;
    }

    /// Resume scanning: installs `new_source` if given and resets the
    /// cursor to 0. Does not reset `state` or the state stack.
    pub fn restart(&mut self, new_source: Option<&str>) {
        if let Some(source) = new_source {
            self.source = source.to_string();
        }
        self.index = 0;
        self.text.clear();
        self.read_more = false;
        self.rejected.clear();
        self.last_rule_index = None;
        self.terminated = false;
    }

    /// Build a [`ScannerError::UserActionError`] for an action that wants to
    /// report a failure through the scanner's own error type.
    pub fn fail(&self, message: impl Into<String>) -> ScannerError {
        ScannerError::UserActionError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::pattern::PatternSource;
    use crate::scanner::Scanner;
    use crate::states::StateSpec;

    #[test]
    fn push_pop_top_state_roundtrip() {
        let mut scanner: Scanner<()> = Scanner::new();
        scanner.add_state("comment", true).unwrap();
        assert_eq!(scanner.top_state(), None);
        scanner.push_state("comment").unwrap();
        assert_eq!(scanner.state(), "comment");
        assert_eq!(scanner.top_state(), Some("INITIAL"));
        scanner.pop_state().unwrap();
        assert_eq!(scanner.state(), "INITIAL");
        assert_eq!(scanner.pop_state(), Err(crate::error::ScannerError::StackUnderflow));
    }

    #[test]
    fn unput_splices_into_source() {
        let mut scanner: Scanner<()> = Scanner::new();
        scanner.set_source("bc");
        scanner.unput("a");
        assert_eq!(scanner.source(), "abc");
    }

    #[test]
    fn input_reads_and_advances() {
        let mut scanner: Scanner<()> = Scanner::new();
        scanner.set_source("hello");
        assert_eq!(scanner.input(Some(3)), "hel");
        assert_eq!(scanner.index(), 3);
        assert_eq!(scanner.input(Some(10)), "lo");
        assert_eq!(scanner.index(), 5);
        assert_eq!(scanner.input(None), "");
    }

    #[test]
    fn begin_rejects_unknown_state() {
        let mut scanner: Scanner<()> = Scanner::new();
        assert!(scanner.begin(Some("nope")).is_err());
    }

    #[test]
    fn terminate_then_restart_resumes() {
        let mut scanner: Scanner<()> = Scanner::new();
        scanner.add_state_rule(StateSpec::Default, PatternSource::Literal("x".into()), None).unwrap();
        scanner.set_source("x");
        scanner.terminate();
        assert!(scanner.is_terminated());
        scanner.restart(Some("x"));
        assert!(!scanner.is_terminated());
        assert_eq!(scanner.index(), 0);
    }
}
