//! The caller-facing debug hook.
//!
//! `TraceRecord` is distinct from the crate's internal `log::trace!` calls:
//! it exists so a parser integration can observe matched tokens without
//! installing a logging backend, and it only fires when
//! [`crate::Scanner::set_debug_enabled`] is on.

/// One record per successful rule selection, emitted to the trace sink when
/// debug mode is enabled.
#[derive(Debug, Clone)]
pub struct TraceRecord {
    /// The active start condition at the time of selection.
    pub state: String,
    /// The rule's original pattern source (or its literal text).
    pub pattern_source: String,
    /// The text the rule matched.
    pub matched_text: String,
}

/// A callable that receives text destined for the ECHO sink.
pub type EchoSink = Box<dyn FnMut(&str)>;

/// A callable that receives one [`TraceRecord`] per selection, when enabled.
pub type TraceSink = Box<dyn FnMut(&TraceRecord)>;
