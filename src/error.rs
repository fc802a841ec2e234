// error.rs
use std::{fmt, io};
use thiserror::Error;

/// A raw Win32 error code as reported by `GetLastError`
///
/// Native failures are carried with their code intact so callers can
/// translate them into a user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Win32Error(pub u32);

impl Win32Error {
    pub const FILE_NOT_FOUND: Win32Error = Win32Error(2);
    pub const PATH_NOT_FOUND: Win32Error = Win32Error(3);
    pub const ACCESS_DENIED: Win32Error = Win32Error(5);
    pub const NO_MORE_FILES: Win32Error = Win32Error(18);
    pub const INSUFFICIENT_BUFFER: Win32Error = Win32Error(122);

    /// Returns the numeric error code
    pub fn code(self) -> u32 {
        self.0
    }

    /// Whether a search-open failure with this code means "nothing matched"
    pub fn is_not_found(self) -> bool {
        self == Self::FILE_NOT_FOUND || self == Self::NO_MORE_FILES
    }
}

impl fmt::Display for Win32Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FILE_NOT_FOUND => write!(f, "file not found (os error {})", self.0),
            Self::PATH_NOT_FOUND => write!(f, "path not found (os error {})", self.0),
            Self::ACCESS_DENIED => write!(f, "access denied (os error {})", self.0),
            Self::NO_MORE_FILES => write!(f, "no more files (os error {})", self.0),
            Self::INSUFFICIENT_BUFFER => write!(f, "buffer too small (os error {})", self.0),
            _ => write!(f, "os error {}", self.0),
        }
    }
}

impl From<Win32Error> for io::Error {
    fn from(e: Win32Error) -> Self {
        io::Error::from_raw_os_error(e.0 as i32)
    }
}

/// Error types for path normalization and enumeration
///
/// Validation errors are raised before any buffer is rented or any native
/// call is made. Native failures keep the underlying Win32 code.
#[derive(Error, Debug)]
pub enum PathError {
    /// The path contains an embedded NUL character
    #[error("Illegal characters in path")]
    InvalidPath,

    /// The search pattern contains a `..` that escapes its name segment
    #[error("Invalid search pattern: {0:?}")]
    InvalidSearchPattern(String),

    /// The full-path primitive failed
    #[error("Could not resolve full path: {0}")]
    ResolutionFailed(Win32Error),

    /// Opening a directory search failed for a reason other than "not found"
    #[error("Directory enumeration failed: {0}")]
    EnumerationFailed(Win32Error),

    /// Querying file attributes failed
    #[error("Could not query attributes: {0}")]
    AttributesFailed(Win32Error),
}

impl PathError {
    /// The underlying Win32 code, if this error came from a native call
    pub fn native_code(&self) -> Option<Win32Error> {
        match self {
            Self::ResolutionFailed(e) | Self::EnumerationFailed(e) | Self::AttributesFailed(e) => {
                Some(*e)
            }
            Self::InvalidPath | Self::InvalidSearchPattern(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_error_converts_to_raw_os_error() {
        let err = io::Error::from(Win32Error::ACCESS_DENIED);
        assert_eq!(err.raw_os_error(), Some(5));
        let err: io::Error = Win32Error(1234).into();
        assert_eq!(err.raw_os_error(), Some(1234));
    }

    #[test]
    fn native_code_only_for_native_failures() {
        let e = PathError::EnumerationFailed(Win32Error::PATH_NOT_FOUND);
        assert_eq!(e.native_code(), Some(Win32Error::PATH_NOT_FOUND));
        assert_eq!(PathError::InvalidPath.native_code(), None);
        assert_eq!(
            PathError::InvalidSearchPattern("..".into()).native_code(),
            None
        );
    }

    #[test]
    fn display_names_known_codes() {
        assert_eq!(
            Win32Error::INSUFFICIENT_BUFFER.to_string(),
            "buffer too small (os error 122)"
        );
        assert_eq!(Win32Error(87).to_string(), "os error 87");
        assert!(Win32Error::NO_MORE_FILES.is_not_found());
        assert!(!Win32Error::ACCESS_DENIED.is_not_found());
    }
}
