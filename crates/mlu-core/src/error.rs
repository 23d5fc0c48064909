//! Error type shared by the helper functions in this crate.

use thiserror::Error;

/// mlu-core result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by argument validation and helper functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument has a value the callee cannot work with
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Argument name
        arg: String,
        /// Why it's invalid, including the offending value
        reason: String,
    },

    /// None of the candidate parameter names is accepted by the callee
    #[error("not compatible signature for {callee}. Candidates: {candidates:?}, available arguments: {available:?}")]
    Compatibility {
        /// Name of the callee whose signature was inspected
        callee: String,
        /// Names that were tried in order
        candidates: Vec<String>,
        /// Parameter names the callee declares
        available: Vec<String>,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(arg: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            arg: arg.into(),
            reason: reason.into(),
        }
    }
}
