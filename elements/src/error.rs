// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of an `ArchiveError`, for callers that branch on the
/// kind of failure rather than its details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    Unavailable,
    Internal,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    // InvalidArgument: the file name does not follow the naming convention it
    // was parsed with.
    #[error("malformed file name {name:?}: {reason}")]
    MalformedName { name: String, reason: String },

    // Unavailable: the archive has no directory for the requested day.
    #[error("archive directory {0:?} is unavailable")]
    ArchiveUnavailable(PathBuf),

    // NotFound: nothing in the archive satisfies the query.
    #[error("{0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ArchiveError::MalformedName{..} => ErrorCode::InvalidArgument,
            ArchiveError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            ArchiveError::ArchiveUnavailable(_) => ErrorCode::Unavailable,
            ArchiveError::NotFound(_) => ErrorCode::NotFound,
            ArchiveError::Io{..} => ErrorCode::Internal,
        }
    }

    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        ArchiveError::MalformedName{name: name.to_string(), reason: reason.into()}
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ArchiveError::Io{path: path.into(), source}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ArchiveError::malformed("x", "too short").code(),
                   ErrorCode::InvalidArgument);
        assert_eq!(ArchiveError::ArchiveUnavailable(PathBuf::from("/a")).code(),
                   ErrorCode::Unavailable);
        assert_eq!(ArchiveError::NotFound("none".to_string()).code(),
                   ErrorCode::NotFound);
        let io_err = ArchiveError::io(
            "/a/b", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(io_err.code(), ErrorCode::Internal);
        assert!(io_err.to_string().contains("denied"));
    }

    #[test]
    fn test_malformed_message() {
        let err = ArchiveError::malformed("bad_name", "expected 6 fields, got 2");
        assert_eq!(err.to_string(),
                   "malformed file name \"bad_name\": expected 6 fields, got 2");
    }

}  // mod tests.
