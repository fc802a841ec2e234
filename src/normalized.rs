// normalized.rs
use crate::path::is_extended;
use crate::pool::PooledBuffer;
use std::fmt;

#[derive(Debug)]
enum Backing<'a> {
    /// The caller's input, reused without copying
    Verbatim(&'a [u16]),
    /// A sub-range of a rented buffer
    Pooled {
        buffer: PooledBuffer<'a>,
        start: usize,
        len: usize,
    },
}

/// The result of normalizing a path
///
/// Either borrows the caller's input or owns a slice of a pooled buffer,
/// never both. A value with no backing at all is the empty sentinel: the
/// normalizer deliberately produced nothing (for instance a trailing
/// separator that was not allowed). Check [`is_empty_result`] before use.
///
/// Dropping the value returns any rented buffer to its pool.
///
/// [`is_empty_result`]: NormalizedPath::is_empty_result
#[derive(Debug)]
pub struct NormalizedPath<'a> {
    backing: Option<Backing<'a>>,
}

impl<'a> NormalizedPath<'a> {
    pub(crate) fn empty() -> Self {
        Self { backing: None }
    }

    pub(crate) fn verbatim(path: &'a [u16]) -> Self {
        Self {
            backing: Some(Backing::Verbatim(path)),
        }
    }

    pub(crate) fn pooled(buffer: PooledBuffer<'a>, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= buffer.as_slice().len());
        Self {
            backing: Some(Backing::Pooled { buffer, start, len }),
        }
    }

    /// Whether normalization produced nothing
    pub fn is_empty_result(&self) -> bool {
        self.backing.is_none()
    }

    /// Whether the path is backed by a pooled buffer rather than the input
    pub fn is_pooled(&self) -> bool {
        matches!(self.backing, Some(Backing::Pooled { .. }))
    }

    /// The normalized path as UTF-16, without a terminator
    pub fn as_wide(&self) -> &[u16] {
        match &self.backing {
            None => &[],
            Some(Backing::Verbatim(s)) => *s,
            Some(Backing::Pooled { buffer, start, len }) => &buffer.as_slice()[*start..*start + *len],
        }
    }

    /// Length in UTF-16 code units; 0 for the empty sentinel
    pub fn len(&self) -> usize {
        self.as_wide().len()
    }

    /// Whether the path has no code units
    ///
    /// Also true for the empty sentinel; use
    /// [`is_empty_result`](NormalizedPath::is_empty_result) to tell them apart.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the path starts with `\\?\`
    pub fn is_extended(&self) -> bool {
        is_extended(self.as_wide())
    }

    /// Decodes the path, replacing unpaired surrogates with U+FFFD
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_wide())
    }

    /// Copies the path out and releases the pooled buffer
    ///
    /// # Returns
    ///
    /// An owned copy of [`as_wide`](NormalizedPath::as_wide). Any rented
    /// buffer is back in its pool once this returns.
    pub fn into_owned(self) -> Vec<u16> {
        self.as_wide().to_vec()
    }

    /// Converts to an `OsString` for use with `std::fs`
    #[cfg(windows)]
    pub fn to_os_string(&self) -> std::ffi::OsString {
        use std::os::windows::ffi::OsStringExt;
        std::ffi::OsString::from_wide(self.as_wide())
    }
}

impl fmt::Display for NormalizedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
