//! Error types for XZarc operations.
//!
//! Every failure a session can end with maps onto one [`StatusKind`], a small
//! closed set of codes that the command-line driver turns into its exit
//! status. [`XzarcError`] carries the kind together with a human-readable
//! cause, so callers branch on [`XzarcError::kind`] instead of on message
//! text.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal status of a session, with stable numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Transform finished and the engine reported end of stream.
    Ok,
    /// The codec engine could not be initialized.
    Init,
    /// Reading the source failed.
    Input,
    /// Writing the destination failed.
    Output,
    /// The encoder reported a failure.
    Compress,
    /// No valid direction was selected.
    Mode,
    /// The decoder reported a failure.
    Decompress,
}

impl StatusKind {
    /// Process exit code for this status.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Init => 1,
            Self::Input => 2,
            Self::Output => 3,
            Self::Compress => 4,
            Self::Mode => 5,
            Self::Decompress => 6,
        }
    }

    /// Short diagnostic label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Init => "Failed init",
            Self::Input => "Failed input",
            Self::Output => "Failed output",
            Self::Compress => "Failed compress",
            Self::Mode => "Failed mode",
            Self::Decompress => "Failed decompress",
        }
    }

    /// Whether this is the success status.
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a codec engine step or initialization.
///
/// The pump does not interpret engine failures; it only attributes them to
/// the direction of the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Create an engine error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The engine step was attempted after the engine was released.
    pub fn released() -> Self {
        Self::new("codec engine already released")
    }

    /// Description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The main error type for XZarc operations.
#[derive(Debug, Error)]
pub enum XzarcError {
    /// The codec engine rejected its configuration or ran out of resources.
    #[error("Failed init: {0}")]
    Init(EngineError),

    /// I/O error while reading the source.
    #[error("Failed input: {0}")]
    Input(#[source] io::Error),

    /// I/O error while writing the destination.
    #[error("Failed output: {0}")]
    Output(#[source] io::Error),

    /// The encoder failed.
    #[error("Failed compress: {0}")]
    Compress(EngineError),

    /// The decoder failed or the container is malformed.
    #[error("Failed decompress: {0}")]
    Decompress(EngineError),

    /// Neither compression nor decompression was requested.
    #[error("Failed mode: no archive mode selected")]
    Mode,

    /// The input path does not follow the suffix convention for the direction.
    #[error("Failed input: {}: {reason}", .path.display())]
    Suffix {
        /// Offending input path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: &'static str,
    },
}

/// Result type alias for XZarc operations.
pub type Result<T> = std::result::Result<T, XzarcError>;

impl XzarcError {
    /// Create an initialization error.
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init(EngineError::new(message))
    }

    /// Create an input error from an I/O failure.
    pub fn input(err: io::Error) -> Self {
        Self::Input(err)
    }

    /// Create an output error from an I/O failure.
    pub fn output(err: io::Error) -> Self {
        Self::Output(err)
    }

    /// Create a compression error.
    pub fn compress(message: impl Into<String>) -> Self {
        Self::Compress(EngineError::new(message))
    }

    /// Create a decompression error.
    pub fn decompress(message: impl Into<String>) -> Self {
        Self::Decompress(EngineError::new(message))
    }

    /// Create a suffix rule violation.
    pub fn suffix(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        Self::Suffix {
            path: path.into(),
            reason,
        }
    }

    /// Status kind this error terminates a session with.
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Init(_) => StatusKind::Init,
            Self::Input(_) | Self::Suffix { .. } => StatusKind::Input,
            Self::Output(_) => StatusKind::Output,
            Self::Compress(_) => StatusKind::Compress,
            Self::Decompress(_) => StatusKind::Decompress,
            Self::Mode => StatusKind::Mode,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind().code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusKind::Ok.code(), 0);
        assert_eq!(StatusKind::Init.code(), 1);
        assert_eq!(StatusKind::Input.code(), 2);
        assert_eq!(StatusKind::Output.code(), 3);
        assert_eq!(StatusKind::Compress.code(), 4);
        assert_eq!(StatusKind::Mode.code(), 5);
        assert_eq!(StatusKind::Decompress.code(), 6);
        assert!(StatusKind::Ok.is_ok());
        assert!(!StatusKind::Input.is_ok());
    }

    #[test]
    fn test_error_kind() {
        let err = XzarcError::input(io::Error::other("boom"));
        assert_eq!(err.kind(), StatusKind::Input);
        assert_eq!(err.exit_code(), 2);

        assert_eq!(XzarcError::compress("x").kind(), StatusKind::Compress);
        assert_eq!(XzarcError::decompress("x").kind(), StatusKind::Decompress);
        assert_eq!(XzarcError::init("x").kind(), StatusKind::Init);
        assert_eq!(XzarcError::Mode.exit_code(), 5);
        assert_eq!(
            XzarcError::suffix("a.xz", "already has .xz suffix").kind(),
            StatusKind::Input
        );
    }

    #[test]
    fn test_error_display() {
        let err = XzarcError::decompress("file format not recognized");
        assert_eq!(
            err.to_string(),
            "Failed decompress: file format not recognized"
        );

        let err = XzarcError::suffix("notes.txt", "has no .xz suffix");
        assert!(err.to_string().contains("notes.txt"));
        assert!(err.to_string().contains("no .xz suffix"));
    }
}
