// path/prefix.rs
use super::{DOT, QUESTION, RESERVE, SEP};

/// Rewrites a resolved path into extended-length form inside its buffer
///
/// `buffer[RESERVE..RESERVE + len]` holds the resolved path and the first
/// `RESERVE` code units are free. Returns the `(start, len)` of the
/// rewritten path within `buffer`.
///
/// * `\\.\dev` becomes `\\?\dev` in place
/// * `\\server\share` becomes `\\?\UNC\server\share`, reusing the second
///   leading backslash as the separator after `UNC`
/// * anything else gets `\\?\` written directly in front of it
pub fn rewrite(buffer: &mut [u16], len: usize) -> (usize, usize) {
    let path = &buffer[RESERVE..RESERVE + len];

    if len > 2 && path[0] == SEP && path[1] == SEP {
        if path[2] == DOT {
            buffer[RESERVE + 2] = QUESTION;
            return (RESERVE, len);
        }
        if path[2] != SEP {
            write_ascii(&mut buffer[..RESERVE + 1], r"\\?\UNC");
            return (0, len + RESERVE);
        }
    }

    write_ascii(&mut buffer[RESERVE - 4..RESERVE], r"\\?\");
    (RESERVE - 4, len + 4)
}

fn write_ascii(dst: &mut [u16], s: &str) {
    for (d, b) in dst.iter_mut().zip(s.bytes()) {
        *d = b as u16;
    }
}
