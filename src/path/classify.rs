// path/classify.rs
use super::{is_extended, VOLUME_SEP};

/// The shape of a raw path, deciding how normalization proceeds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathShape {
    /// Contains a NUL, which native calls would treat as end-of-string
    EmbeddedNul,
    /// Already starts with `\\?\`; resolution is skipped
    Extended,
    /// Exactly `X:`, meaning the current directory on drive X
    DriveRelative,
    /// Anything else; resolved through the full-path primitive
    Ordinary,
}

/// Classifies a raw path
///
/// The NUL check comes first so that an extended path with an embedded NUL
/// is still rejected.
pub fn classify(path: &[u16]) -> PathShape {
    if path.contains(&0) {
        PathShape::EmbeddedNul
    } else if is_extended(path) {
        PathShape::Extended
    } else if should_revise_to_current(path) {
        PathShape::DriveRelative
    } else {
        PathShape::Ordinary
    }
}

fn should_revise_to_current(path: &[u16]) -> bool {
    path.len() == 2 && path[1] == VOLUME_SEP
}
