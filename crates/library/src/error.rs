//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. The storage or render error that
//! caused a failure stays attached as a child frame.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a generation failure.
///
/// ### Fatal before any write
/// - [`ErrorKind::Filesystem`]
///
/// ### Fatal for the current index
/// - [`ErrorKind::Io`]
/// - [`ErrorKind::Render`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The mirror root is missing or isn't a directory.
    #[display("mirror root is not a usable directory")]
    Filesystem,
    /// Listing a directory, hashing a wheel or writing an index failed.
    #[display("I/O failure while indexing mirror")]
    Io,
    /// An index page couldn't be rendered.
    #[display("failed to render index page")]
    Render,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            _ => false,
        }
    }
}
