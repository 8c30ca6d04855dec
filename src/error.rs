//! Error taxonomy for configuration and runtime failures.
//!
//! Configuration errors (bad names, bad patterns, unknown states) are
//! surfaced immediately as `Result::Err` from the method that detected them.
//! Runtime errors from user actions are never caught by the driver; an
//! action that wants to report a failure through the scanner's own error
//! type can do so via [`crate::Scanner::fail`], which is what produces
//! [`ScannerError::UserActionError`].

use thiserror::Error;

/// Errors produced by scanner configuration and by explicit action failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScannerError {
    /// A definition or state name failed the identifier grammar, or a state
    /// was re-registered with a different exclusivity flag.
    #[error("invalid name `{0}`")]
    InvalidName(String),

    /// A pattern was neither a valid literal nor a regex the engine could
    /// compile, or it requested an unsupported flag.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A literal or regex pattern source was empty.
    #[error("empty pattern")]
    EmptyPattern,

    /// A rule or transition referenced a state that was never registered.
    #[error("unknown state `{0}`")]
    UnknownState(String),

    /// A rule's resolved state set was empty after filtering.
    #[error("rule has no states to attach to")]
    EmptyStateSet,

    /// `pop_state` was called with an empty state stack.
    #[error("state stack underflow")]
    StackUnderflow,

    /// An action explicitly reported a failure via [`crate::Scanner::fail`].
    #[error("action error: {0}")]
    UserActionError(String),
}

/// Convenience alias used throughout the crate's configuration surface.
pub type Result<T> = std::result::Result<T, ScannerError>;
