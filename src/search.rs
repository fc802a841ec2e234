// search.rs
use crate::error::PathError;
use crate::path::{ends_in_directory_separator, root_length, to_wide};

/// Characters trimmed from the end of a search pattern
///
/// Narrower than `char::is_whitespace`: this is the set filesystems such as
/// NTFS and FAT actually ignore.
pub const TRIM_END_CHARS: [char; 8] = [
    '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}', '\u{0085}', '\u{00A0}',
];

fn is_separator_char(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Checks that every `..` in `pattern` sits inside a longer name
///
/// `a..b` and `abc..d` are valid; `..`, `ab..`, `..\x` and `abc..d\abc..`
/// are not, since no file or directory name can end in `..`.
///
/// # Errors
///
/// Returns `PathError::InvalidSearchPattern` on the first offending `..`.
pub fn check_search_pattern(pattern: &str) -> Result<(), PathError> {
    let bytes = pattern.as_bytes();
    let mut from = 0;
    while let Some(found) = pattern[from..].find("..") {
        let index = from + found;
        let after = index + 2;
        if after == bytes.len() || is_separator_char(bytes[after] as char) {
            return Err(PathError::InvalidSearchPattern(pattern.to_string()));
        }
        // overlapping matches are skipped: "..." is checked once, at 0
        from = after;
    }
    Ok(())
}

/// Trims, rewrites and validates a directory search pattern
///
/// A lone `.` becomes `*` so that it lists the directory, the way `dir .`
/// does.
pub fn normalize_search_pattern(pattern: &str) -> Result<String, PathError> {
    let trimmed = pattern.trim_end_matches(&TRIM_END_CHARS[..]);
    let normalized = if trimmed == "." { "*" } else { trimmed };

    check_search_pattern(normalized)?;
    Ok(normalized.to_string())
}

/// Builds the string handed to the search-open primitive
///
/// Joins `directory` and `pattern` with a separator and appends `*` when the
/// result ends in a separator or `:`, which the native search would
/// otherwise reject as "not found".
///
/// # Arguments
///
/// * `directory` - Normalized directory path, usually extended-length
/// * `pattern` - Search pattern, already passed through
///   [`normalize_search_pattern`]
///
/// # Returns
///
/// The UTF-16 search string without a terminator.
///
/// # Errors
///
/// Returns `PathError::InvalidSearchPattern` for an empty or rooted pattern.
pub fn full_search_string(directory: &[u16], pattern: &str) -> Result<Vec<u16>, PathError> {
    let wide_pattern = to_wide(pattern);
    check_relative_pattern(pattern, &wide_pattern)?;

    let mut search = Vec::with_capacity(directory.len() + wide_pattern.len() + 2);
    search.extend_from_slice(directory);
    if !search.is_empty() && !ends_with_joiner(&search) {
        search.push(b'\\' as u16);
    }
    search.extend_from_slice(&wide_pattern);

    if ends_with_joiner(&search) {
        search.push(b'*' as u16);
    }
    Ok(search)
}

/// Rejects a pattern that is empty or carries its own root
pub fn check_not_empty_or_rooted(pattern: &str) -> Result<(), PathError> {
    check_relative_pattern(pattern, &to_wide(pattern))
}

fn check_relative_pattern(pattern: &str, wide_pattern: &[u16]) -> Result<(), PathError> {
    if wide_pattern.is_empty() || root_length(wide_pattern) != 0 {
        return Err(PathError::InvalidSearchPattern(pattern.to_string()));
    }
    Ok(())
}

fn ends_with_joiner(path: &[u16]) -> bool {
    ends_in_directory_separator(path) || path.last() == Some(&(b':' as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(p: &str) -> bool {
        normalize_search_pattern(p).is_ok()
    }

    #[test]
    fn dot_dot_validation_table() {
        assert!(valid("a..b"));
        assert!(valid("abc..d"));
        assert!(valid("*.txt"));
        assert!(valid("..ab"));
        assert!(!valid(".."));
        assert!(!valid("ab.."));
        assert!(!valid(r"..\"));
        assert!(!valid(r"abc..\"));
        assert!(!valid(r"abc..d\abc.."));
        assert!(!valid("x/../y"));
    }

    #[test]
    fn runs_of_dots_are_scanned_in_pairs() {
        assert!(check_search_pattern("...").is_ok());
        assert!(check_search_pattern(r"a...\").is_ok());
        assert!(check_search_pattern("....").is_err());
        assert!(check_search_pattern(r"a....\").is_err());
    }

    #[test]
    fn lone_dot_means_everything() {
        assert_eq!(normalize_search_pattern(".").unwrap(), "*");
        assert_eq!(normalize_search_pattern(". \t").unwrap(), "*");
    }

    #[test]
    fn trims_only_the_fixed_set() {
        assert_eq!(
            normalize_search_pattern("*.txt \t\r\n\u{0085}\u{00A0}").unwrap(),
            "*.txt"
        );
        // U+3000 is Unicode whitespace but filesystems keep it
        assert_eq!(
            normalize_search_pattern("a\u{3000}").unwrap(),
            "a\u{3000}"
        );
        // leading whitespace is kept
        assert_eq!(normalize_search_pattern("  a").unwrap(), "  a");
    }

    #[test]
    fn rejection_carries_the_pattern() {
        match normalize_search_pattern("ab..  ") {
            Err(PathError::InvalidSearchPattern(p)) => assert_eq!(p, "ab.."),
            other => panic!("unexpected {other:?}"),
        }
    }

    fn search(dir: &str, pattern: &str) -> Result<String, PathError> {
        full_search_string(&to_wide(dir), pattern).map(|w| String::from_utf16_lossy(&w))
    }

    #[test]
    fn full_search_string_joins_and_appends_wildcard() {
        assert_eq!(search(r"\\?\C:\dir", "*.rs").unwrap(), r"\\?\C:\dir\*.rs");
        assert_eq!(search(r"\\?\C:\", "*").unwrap(), r"\\?\C:\*");
        assert_eq!(search(r"\\?\C:\dir", r"sub\").unwrap(), r"\\?\C:\dir\sub\*");
    }

    #[test]
    fn full_search_string_rejects_empty_or_rooted_pattern() {
        assert!(search(r"C:\dir", "").is_err());
        assert!(search(r"C:\dir", r"\abs").is_err());
        assert!(search(r"C:\dir", r"D:\abs").is_err());
    }
}
