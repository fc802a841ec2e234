// lib.rs
#![deny(unsafe_code)]

pub mod enumerate;
pub mod error;
pub mod native;
pub mod normalized;
pub mod options;
pub mod path;
pub mod pool;
pub mod search;

pub use crate::enumerate::{DirectoryEnumerator, EnumeratorState};
pub use crate::error::{PathError, Win32Error};
pub use crate::native::{FileAttributes, FindEntry, NativeFs};
pub use crate::normalized::NormalizedPath;
pub use crate::options::{NormalizeOptions, NormalizeOptionsBuilder, PoolOptions, SizingStrategy};
pub use crate::path::{directory_name, split_directory_file, to_wide};
pub use crate::pool::{BufferPool, PoolMetrics, PooledBuffer};
pub use crate::search::normalize_search_pattern;

#[cfg(windows)]
pub use crate::native::Win32Fs;

/// Main facade for the longpath library
///
/// Binds a native backend to a shared [`BufferPool`] and a set of
/// [`NormalizeOptions`]. Build the pool once and hand the same reference to
/// every `LongPath` in the process.
///
/// # Examples
///
/// The pure building blocks need no native backend:
///
/// ```
/// use longpath::{normalize_search_pattern, split_directory_file, to_wide};
///
/// assert_eq!(normalize_search_pattern(".").unwrap(), "*");
/// assert!(normalize_search_pattern(r"abc..\").is_err());
///
/// let path = to_wide(r"\\?\C:\dir\file.txt");
/// let (dir, file) = split_directory_file(&path);
/// assert_eq!(String::from_utf16_lossy(dir), r"\\?\C:\dir");
/// assert_eq!(file.map(String::from_utf16_lossy).as_deref(), Some("file.txt"));
/// ```
pub struct LongPath<'p, N: NativeFs> {
    native: N,
    pool: &'p BufferPool,
    options: NormalizeOptions,
}

impl<'p, N: NativeFs> LongPath<'p, N> {
    /// Creates a facade with default options
    pub fn new(native: N, pool: &'p BufferPool) -> Self {
        Self::with_options(native, pool, NormalizeOptions::default())
    }

    /// Creates a facade with explicit options
    ///
    /// # Arguments
    ///
    /// * `native` - Backend that performs the OS calls
    /// * `pool` - Shared pool that resolution buffers are rented from
    /// * `options` - Normalization settings used by [`LongPath::normalize`]
    pub fn with_options(native: N, pool: &'p BufferPool, options: NormalizeOptions) -> Self {
        Self {
            native,
            pool,
            options,
        }
    }

    /// Returns the normalization options in effect
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Returns the native backend, e.g. to issue calls with a normalized path
    pub fn native(&self) -> &N {
        &self.native
    }

    /// Normalizes `path` into extended-length form
    ///
    /// # Arguments
    ///
    /// * `path` - Relative, rooted, UNC, device or extended path as UTF-16
    ///
    /// # Returns
    ///
    /// A [`NormalizedPath`] borrowing both `path` and the pool. Check
    /// [`NormalizedPath::is_empty_result`] before using it.
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidPath` for an embedded NUL and
    /// `PathError::ResolutionFailed` when the OS cannot resolve the path.
    pub fn normalize<'a>(&'a self, path: &'a [u16]) -> Result<NormalizedPath<'a>, PathError>
    where
        'p: 'a,
    {
        crate::path::normalize(&self.native, self.pool, path, &self.options)
    }

    /// Normalizes `path` and copies the result into a `String`
    ///
    /// Returns `Ok(None)` for the empty sentinel.
    pub fn normalize_to_string(&self, path: &str) -> Result<Option<String>, PathError> {
        let wide = to_wide(path);
        let normalized = self.normalize(&wide)?;
        if normalized.is_empty_result() {
            return Ok(None);
        }
        Ok(Some(normalized.to_string_lossy()))
    }

    /// Options used for paths that name a directory or an existing item,
    /// where a trailing separator is common and harmless
    fn lenient_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            allow_trailing_separator: true,
            ..self.options.clone()
        }
    }

    fn normalize_lenient<'a>(&'a self, path: &'a [u16]) -> Result<NormalizedPath<'a>, PathError>
    where
        'p: 'a,
    {
        let options = self.lenient_options();
        let normalized = crate::path::normalize(&self.native, self.pool, path, &options)?;
        if normalized.is_empty_result() {
            return Err(PathError::InvalidPath);
        }
        Ok(normalized)
    }

    /// Queries the attributes of `path` through its long form
    ///
    /// # Errors
    ///
    /// Propagates normalization errors and returns
    /// `PathError::AttributesFailed` when the query fails.
    pub fn attributes(&self, path: &[u16]) -> Result<FileAttributes, PathError> {
        let normalized = self.normalize_lenient(path)?;
        self.native
            .file_attributes(normalized.as_wide())
            .map_err(PathError::AttributesFailed)
    }

    /// Whether `path` names an existing file or directory
    ///
    /// Invalid paths and failed queries both report `false`.
    pub fn exists(&self, path: &[u16]) -> bool {
        self.attributes(path).is_ok()
    }

    /// Opens an enumeration of `directory` filtered by `pattern`
    ///
    /// The `.` and `..` pseudo-entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns normalization errors, `PathError::InvalidSearchPattern`, or
    /// `PathError::EnumerationFailed` if the search cannot be opened.
    pub fn enumerate(
        &self,
        directory: &[u16],
        pattern: &str,
    ) -> Result<DirectoryEnumerator<&N>, PathError> {
        // validate before renting anything for the directory
        let pattern = normalize_search_pattern(pattern)?;
        search::check_not_empty_or_rooted(&pattern)?;

        let normalized = self.normalize_lenient(directory)?;
        let mut enumerator = DirectoryEnumerator::new(&self.native).skip_dot_entries(true);
        enumerator.open(normalized.as_wide(), &pattern)?;
        Ok(enumerator)
    }

    /// Splits a full path into its directory and file name
    ///
    /// The path is not re-normalized; pass the output of
    /// [`LongPath::normalize`].
    ///
    /// # Returns
    ///
    /// `(directory, Some(file))`, or `(path, None)` when no separator
    /// follows the root. Both parts borrow `path`.
    pub fn split<'a>(&self, path: &'a [u16]) -> (&'a [u16], Option<&'a [u16]>) {
        crate::path::split_directory_file(path)
    }

    /// Returns the parent directory of a full path, or `None` at its root
    pub fn directory_name<'a>(&self, path: &'a [u16]) -> Option<&'a [u16]> {
        crate::path::directory_name(path)
    }
}

#[cfg(windows)]
impl<'p> LongPath<'p, Win32Fs> {
    /// Creates a facade backed by kernel32
    pub fn win32(pool: &'p BufferPool) -> Self {
        Self::new(Win32Fs, pool)
    }
}
