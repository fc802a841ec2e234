// path/split.rs
use super::{ends_in_directory_separator, is_directory_separator, root_length};

/// Splits a validated full path into directory and file parts
///
/// This does not re-normalize: the parts are slices of `path`. One trailing
/// separator is ignored. When no separator remains past the root, the path
/// is the root itself and the file part is `None`.
pub fn split_directory_file(path: &[u16]) -> (&[u16], Option<&[u16]>) {
    let root = root_length(path);
    let mut len = path.len();

    if len > root && ends_in_directory_separator(path) {
        len -= 1;
    }

    for pivot in (root..len).rev() {
        if is_directory_separator(path[pivot]) {
            return (&path[..pivot], Some(&path[pivot + 1..len]));
        }
    }

    (&path[..len], None)
}

/// Lightweight parent lookup that does not re-normalize
///
/// Returns `None` once the root has been reached.
pub fn directory_name(path: &[u16]) -> Option<&[u16]> {
    match split_directory_file(path) {
        (directory, Some(_)) => Some(directory),
        (_, None) => None,
    }
}
