// path/mod.rs
//! Windows path shapes, root lengths and the normalization pipeline
//!
//! All functions here work on UTF-16 code units so that paths handed to the
//! native layer never round-trip through lossy conversions.

pub mod classify;
pub mod prefix;
pub mod resolve;
pub mod split;

pub use classify::{classify, PathShape};
pub use resolve::normalize;
pub use split::{directory_name, split_directory_file};

/// Classic path-length ceiling, also the default first buffer guess
pub const MAX_PATH: usize = 260;

/// Code units kept free in front of a resolved path for prefix insertion
pub const RESERVE: usize = 6;

/// Length of the `X:\` drive root
pub const DRIVE_ROOT_LEN: usize = 3;

pub const EXTENDED_PREFIX: &str = r"\\?\";
pub const UNC_EXTENDED_PREFIX: &str = r"\\?\UNC\";

pub(crate) const SEP: u16 = b'\\' as u16;
pub(crate) const ALT_SEP: u16 = b'/' as u16;
pub(crate) const VOLUME_SEP: u16 = b':' as u16;
pub(crate) const DOT: u16 = b'.' as u16;
pub(crate) const QUESTION: u16 = b'?' as u16;

/// Encodes a string as UTF-16 without a terminator
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

pub fn is_directory_separator(c: u16) -> bool {
    c == SEP || c == ALT_SEP
}

pub fn ends_in_directory_separator(path: &[u16]) -> bool {
    path.last().is_some_and(|&c| is_directory_separator(c))
}

/// Drops one trailing separator, if present
pub fn trim_ending_directory_separator(path: &[u16]) -> &[u16] {
    if ends_in_directory_separator(path) {
        &path[..path.len() - 1]
    } else {
        path
    }
}

fn starts_with_ascii(path: &[u16], prefix: &str) -> bool {
    path.len() >= prefix.len() && path.iter().zip(prefix.bytes()).all(|(&c, b)| c == b as u16)
}

/// Whether the path already carries the `\\?\` prefix
///
/// Only backslashes count here: `//?/` is not treated as extended by the OS.
pub fn is_extended(path: &[u16]) -> bool {
    starts_with_ascii(path, EXTENDED_PREFIX)
}

fn is_extended_unc(path: &[u16]) -> bool {
    path.len() >= UNC_EXTENDED_PREFIX.len()
        && is_extended(path)
        && path[4..7]
            .iter()
            .zip("UNC".bytes())
            .all(|(&c, b)| c == b as u16 || c == b.to_ascii_lowercase() as u16)
        && is_directory_separator(path[7])
}

/// Length of the root of `path`, in code units
///
/// Handles `\\?\X:\`, `\\?\UNC\server\share`, `\\server\share`, `X:\`, `X:`
/// and a single leading separator. Relative paths have a root length of 0.
pub fn root_length(path: &[u16]) -> usize {
    let len = path.len();
    let extended = is_extended(path);
    let extended_unc = is_extended_unc(path);

    let mut volume_separator_len = 2;
    let mut unc_root_len = 2;
    if extended {
        if extended_unc {
            unc_root_len = UNC_EXTENDED_PREFIX.len();
        } else {
            volume_separator_len += EXTENDED_PREFIX.len();
        }
    }

    if (!extended || extended_unc) && len > 0 && is_directory_separator(path[0]) {
        // rooted, possibly UNC
        let mut i = 1;
        if extended_unc || (len > 1 && is_directory_separator(path[1])) {
            // skip server and share names
            i = unc_root_len;
            let mut remaining = 2;
            while i < len {
                if is_directory_separator(path[i]) {
                    remaining -= 1;
                    if remaining == 0 {
                        break;
                    }
                }
                i += 1;
            }
        }
        i
    } else if len >= volume_separator_len && path[volume_separator_len - 1] == VOLUME_SEP {
        let mut i = volume_separator_len;
        if len > i && is_directory_separator(path[i]) {
            i += 1;
        }
        i
    } else {
        0
    }
}
