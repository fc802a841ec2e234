// native/mod.rs
//! The operating-system primitives the path layer is built on
//!
//! Everything above this module is platform independent; [`NativeFs`] is
//! the only seam to the OS. [`Win32Fs`] implements it on Windows.

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use self::win32::{Win32FindHandle, Win32Fs};

use crate::error::Win32Error;
use bitflags::bitflags;

bitflags! {
    /// Win32 `FILE_ATTRIBUTE_*` flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FileAttributes: u32 {
        const READONLY = 0x0000_0001;
        const HIDDEN = 0x0000_0002;
        const SYSTEM = 0x0000_0004;
        const DIRECTORY = 0x0000_0010;
        const ARCHIVE = 0x0000_0020;
        const DEVICE = 0x0000_0040;
        const NORMAL = 0x0000_0080;
        const TEMPORARY = 0x0000_0100;
        const SPARSE_FILE = 0x0000_0200;
        const REPARSE_POINT = 0x0000_0400;
        const COMPRESSED = 0x0000_0800;
        const OFFLINE = 0x0000_1000;
        const NOT_CONTENT_INDEXED = 0x0000_2000;
        const ENCRYPTED = 0x0000_4000;

        const _ = !0;
    }
}

/// One directory entry as reported by the search primitives
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FindEntry {
    pub name: String,
    pub attributes: FileAttributes,
    pub size: u64,
    /// FILETIME ticks (100ns since 1601-01-01 UTC)
    pub creation_time: u64,
    pub last_access_time: u64,
    pub last_write_time: u64,
}

impl FindEntry {
    pub fn is_directory(&self) -> bool {
        self.attributes.contains(FileAttributes::DIRECTORY)
    }

    /// Whether this is the `.` or `..` pseudo-entry
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Native filesystem primitives
///
/// Paths are passed without a NUL terminator; implementations append one
/// when the OS requires it.
pub trait NativeFs {
    /// An open directory-search cursor
    type Handle;

    /// Resolves `path` to a full path into `buffer`
    ///
    /// Returns the required length on success. If it is smaller than
    /// `buffer.len()` the path was written and the value is its length
    /// excluding the terminator. If it is larger, nothing useful was written
    /// and the value is the capacity needed, terminator included. A
    /// zero-length `buffer` only queries the required capacity.
    fn full_path_name(&self, path: &[u16], buffer: &mut [u16]) -> Result<usize, Win32Error>;

    /// Queries the attributes of `path`
    fn file_attributes(&self, path: &[u16]) -> Result<FileAttributes, Win32Error>;

    /// Opens a search for `pattern` using the basic information level and
    /// exact name matching, returning the handle and the first entry
    fn find_first(&self, pattern: &[u16]) -> Result<(Self::Handle, FindEntry), Win32Error>;

    /// Advances the search; `Ok(None)` when no entries remain
    fn find_next(&self, handle: &mut Self::Handle) -> Result<Option<FindEntry>, Win32Error>;

    /// Closes the search; called exactly once per opened handle
    fn find_close(&self, handle: Self::Handle);
}

impl<N: NativeFs + ?Sized> NativeFs for &N {
    type Handle = N::Handle;

    fn full_path_name(&self, path: &[u16], buffer: &mut [u16]) -> Result<usize, Win32Error> {
        (**self).full_path_name(path, buffer)
    }

    fn file_attributes(&self, path: &[u16]) -> Result<FileAttributes, Win32Error> {
        (**self).file_attributes(path)
    }

    fn find_first(&self, pattern: &[u16]) -> Result<(Self::Handle, FindEntry), Win32Error> {
        (**self).find_first(pattern)
    }

    fn find_next(&self, handle: &mut Self::Handle) -> Result<Option<FindEntry>, Win32Error> {
        (**self).find_next(handle)
    }

    fn find_close(&self, handle: Self::Handle) {
        (**self).find_close(handle)
    }
}
