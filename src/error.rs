//! Error types for `mdoc`

use std::fmt;
use std::io;
use std::path::PathBuf;

use arrayvec::ArrayString;
use thiserror::Error;

pub use crate::types::MAX_ERROR_LENGTH;

/// Custom result type for `mdoc` operations
pub type Result<T> = std::result::Result<T, Error>;

/// Step of a traversal that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOp {
    /// Opening a directory for iteration
    Open,
    /// Reading an entry's metadata
    Stat,
    /// Iterating a directory's entries
    Read,
}

impl fmt::Display for TraversalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "can't open",
            Self::Stat => "can't get info on",
            Self::Read => "can't read entries of",
        })
    }
}

/// Why a viewer launch failed
#[derive(Debug, Error)]
pub enum LaunchFailure {
    /// The process could not be started
    #[error("{0}")]
    Spawn(#[source] io::Error),
    /// The process was terminated by a signal
    #[error("terminated by a signal")]
    Signaled,
    /// The process exited with status 127
    #[error("command not found")]
    CommandNotFound,
    /// There was nothing to execute
    #[error("empty command line")]
    EmptyCommand,
}

/// Error types for `mdoc`
///
/// # Design
/// - Every failure is returned, never recorded in shared state
/// - A traversal error means all partial results were already dropped
/// - Config messages live in a fixed-size buffer (`MAX_ERROR_LENGTH`)
#[derive(Debug, Error)]
pub enum Error {
    /// A directory could not be opened or read, or an entry could not be stat'ed
    #[error("Error: {op} '{}': {source}", path.display())]
    Traversal {
        /// Failed step
        op:     TraversalOp,
        /// Path the step was applied to
        path:   PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// A buffer could not be grown
    #[error("Error: can't allocate memory for {0}")]
    Allocation(&'static str),

    /// Directory nesting went past the configured limit
    #[error("Error: maximum directory depth of {limit} exceeded at '{}'", path.display())]
    DepthExceeded {
        /// Directory that would have exceeded the limit
        path:  PathBuf,
        /// Configured limit
        limit: usize,
    },

    /// The viewer could not be run to a normal exit
    #[error("Error: can't execute '{program}': {reason}")]
    Launch {
        /// Program that was launched
        program: String,
        /// What went wrong
        #[source]
        reason:  LaunchFailure,
    },

    /// Configuration is missing or malformed
    #[error("Error: {0}")]
    Config(Box<ArrayString<MAX_ERROR_LENGTH>>),

    /// More than one document matched and opening several was not allowed
    #[error("Error: {0} documents matched, refusing to open more than one")]
    TooManyDocuments(usize),

    /// IO operation failed
    #[error("Error: {0}")]
    Io(#[from] io::Error),
}

/// Append as much of `s` as fits
fn push_truncated(buf: &mut ArrayString<MAX_ERROR_LENGTH>, s: &str) {
    for c in s.chars() {
        if buf.try_push(c).is_err() {
            break;
        }
    }
}

impl Error {
    /// Create a configuration error, truncating overlong messages
    pub fn config(msg: &str) -> Self {
        let mut buf = ArrayString::new();
        push_truncated(&mut buf, msg);
        Self::Config(Box::new(buf))
    }

    /// Create a traversal error
    pub fn traversal(op: TraversalOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Traversal { op, path: path.into(), source }
    }

    /// Create a launch error
    pub fn launch(program: impl Into<String>, reason: LaunchFailure) -> Self {
        Self::Launch { program: program.into(), reason }
    }

    /// Whether this error came from walking the filesystem
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        matches!(self, Self::Traversal { .. } | Self::DepthExceeded { .. })
    }

    /// Whether this error came from running the viewer
    #[must_use]
    pub const fn is_launch(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }

    /// Get a user-friendly error message with action items
    #[must_use]
    pub fn user_message(&self) -> ArrayString<MAX_ERROR_LENGTH> {
        let mut msg = ArrayString::new();
        let tip = match self {
            Self::Traversal { .. } | Self::Io(_) => "Tip: Check file permissions and try again",
            Self::Allocation(_) => "Tip: Narrow the search pattern or directories",
            Self::DepthExceeded { .. } => "Tip: Pass -R to stay out of subdirectories",
            Self::Launch { .. } => "Tip: Check the viewer path in your configuration",
            Self::Config(_) => "Tip: Run 'mdoc -g' to generate a configuration",
            Self::TooManyDocuments(_) => "Tip: Refine the pattern or pass -n to open them all",
        };
        push_truncated(&mut msg, &self.to_string());
        push_truncated(&mut msg, "\n");
        push_truncated(&mut msg, tip);
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_display() {
        let err = Error::traversal(
            TraversalOp::Stat,
            "/docs/a.pdf",
            io::Error::from(io::ErrorKind::NotFound),
        );
        let text = err.to_string();
        assert!(text.starts_with("Error: can't get info on '/docs/a.pdf'"), "{text}");
        assert!(err.is_traversal());
        assert!(!err.is_launch());
    }

    #[test]
    fn test_launch_classification() {
        let err = Error::launch("viewer", LaunchFailure::CommandNotFound);
        assert!(err.is_launch());
        assert_eq!(err.to_string(), "Error: can't execute 'viewer': command not found");
    }

    #[test]
    fn test_config_message_truncated() {
        let long = "x".repeat(MAX_ERROR_LENGTH * 2);
        match Error::config(&long) {
            Error::Config(buf) => assert_eq!(buf.len(), MAX_ERROR_LENGTH),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_user_message_has_tip() {
        let msg = Error::TooManyDocuments(3).user_message();
        assert!(msg.contains("3 documents matched"));
        assert!(msg.contains("Tip: "));
    }

    #[test]
    fn test_user_message_never_overflows() {
        let long = "y".repeat(MAX_ERROR_LENGTH);
        let msg = Error::config(&long).user_message();
        assert!(msg.len() <= MAX_ERROR_LENGTH);
        assert!(msg.starts_with("Error: y"));
    }
}
