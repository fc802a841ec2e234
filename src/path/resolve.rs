// path/resolve.rs
use super::{
    classify, prefix, PathShape, DOT, DRIVE_ROOT_LEN, EXTENDED_PREFIX, RESERVE, SEP, VOLUME_SEP,
};
use crate::error::{PathError, Win32Error};
use crate::native::NativeFs;
use crate::normalized::NormalizedPath;
use crate::options::{NormalizeOptions, SizingStrategy};
use crate::pool::{BufferPool, PooledBuffer};
use tracing::{debug, trace, warn};

/// Upper bound on full-path calls for one resolution
pub const MAX_GROWTH_ATTEMPTS: usize = 8;

/// Normalizes `path` into extended-length form
///
/// Extended input is returned as-is (minus an allowed trailing separator).
/// Other input is resolved through [`NativeFs::full_path_name`] into a
/// buffer rented from `pool`, then prefixed with `\\?\` or `\\?\UNC\`.
///
/// # Errors
///
/// Returns `PathError::InvalidPath` for a path with an embedded NUL, before
/// anything is rented. Returns `PathError::ResolutionFailed` when the
/// primitive fails.
///
/// An `Ok` value may be the empty sentinel; see
/// [`NormalizedPath::is_empty_result`].
pub fn normalize<'a, N>(
    native: &N,
    pool: &'a BufferPool,
    path: &'a [u16],
    options: &NormalizeOptions,
) -> Result<NormalizedPath<'a>, PathError>
where
    N: NativeFs + ?Sized,
{
    let shape = classify(path);
    trace!(?shape, len = path.len(), "classified path");

    match shape {
        PathShape::EmbeddedNul => Err(PathError::InvalidPath),
        PathShape::Extended => Ok(normalize_extended(path, options)),
        PathShape::DriveRelative => {
            // "X:" means the current directory on X
            let revised = [path[0], VOLUME_SEP, DOT];
            resolve(native, pool, &revised, options)
        }
        PathShape::Ordinary => resolve(native, pool, path, options),
    }
}

fn normalize_extended<'a>(path: &'a [u16], options: &NormalizeOptions) -> NormalizedPath<'a> {
    let len = path.len();
    if len > EXTENDED_PREFIX.len() && path[len - 1] == SEP && path[len - 2] != VOLUME_SEP {
        if !options.allow_trailing_separator {
            debug!("extended path with trailing separator not allowed");
            return NormalizedPath::empty();
        }
        return NormalizedPath::verbatim(&path[..len - 1]);
    }
    NormalizedPath::verbatim(path)
}

/// Resolves a non-extended path through the full-path primitive
pub fn resolve<'a, N>(
    native: &N,
    pool: &'a BufferPool,
    path: &[u16],
    options: &NormalizeOptions,
) -> Result<NormalizedPath<'a>, PathError>
where
    N: NativeFs + ?Sized,
{
    let mut capacity = match options.sizing {
        SizingStrategy::Guess => options.initial_capacity,
        SizingStrategy::Query => native
            .full_path_name(path, &mut [])
            .map_err(PathError::ResolutionFailed)?,
    };

    let mut holder = PooledBuffer::new(pool);
    let mut attempts = 0;
    let mut len = loop {
        if attempts == MAX_GROWTH_ATTEMPTS {
            warn!(attempts, capacity, "full path kept growing, giving up");
            return Err(PathError::ResolutionFailed(Win32Error::INSUFFICIENT_BUFFER));
        }
        attempts += 1;

        let buffer = holder.rent(capacity + RESERVE);
        let required = native
            .full_path_name(path, &mut buffer[RESERVE..])
            .map_err(PathError::ResolutionFailed)?;
        if required <= capacity {
            break required;
        }
        trace!(required, capacity, "full path buffer too small, growing");
        capacity = required;
    };

    let buffer = holder.as_mut_slice();
    if len > 0 && buffer[RESERVE + len - 1] == SEP {
        if !options.allow_trailing_separator {
            debug!("resolved path has a trailing separator that is not allowed");
            return Ok(NormalizedPath::empty());
        }
        // X:\ has no shorter form
        if len != DRIVE_ROOT_LEN {
            len -= 1;
            buffer[RESERVE + len] = 0;
        }
    }

    let (start, len) = if options.add_extended_prefix {
        prefix::rewrite(buffer, len)
    } else {
        (RESERVE, len)
    };
    Ok(NormalizedPath::pooled(holder, start, len))
}
