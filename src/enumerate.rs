// enumerate.rs
use crate::error::PathError;
use crate::native::{FindEntry, NativeFs};
use crate::search::{full_search_string, normalize_search_pattern};
use tracing::debug;

/// Lifecycle of a [`DirectoryEnumerator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumeratorState {
    Unopened,
    Iterating,
    /// No more entries; the handle, if any, is closed
    Exhausted,
    /// A native call failed; the handle, if any, is closed
    Failed,
}

/// Iterates the entries of one directory through a native search handle
///
/// The handle is closed exactly once: on the transition into `Exhausted` or
/// `Failed`, or on drop if iteration is abandoned early.
pub struct DirectoryEnumerator<N: NativeFs> {
    native: N,
    handle: Option<N::Handle>,
    pending: Option<FindEntry>,
    state: EnumeratorState,
    skip_dot_entries: bool,
}

impl<N: NativeFs> DirectoryEnumerator<N> {
    pub fn new(native: N) -> Self {
        Self {
            native,
            handle: None,
            pending: None,
            state: EnumeratorState::Unopened,
            skip_dot_entries: false,
        }
    }

    /// Hides the `.` and `..` pseudo-entries
    pub fn skip_dot_entries(mut self, v: bool) -> Self {
        self.skip_dot_entries = v;
        self
    }

    pub fn state(&self) -> EnumeratorState {
        self.state
    }

    /// Starts a search for `pattern` inside the normalized `directory`
    ///
    /// A search that matches nothing is not an error: the enumerator goes
    /// straight to `Exhausted`. Opening again closes any previous search.
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidSearchPattern` before any native call if
    /// the pattern is malformed, and `PathError::EnumerationFailed` if the
    /// search-open primitive fails for a reason other than "not found".
    pub fn open(&mut self, directory: &[u16], pattern: &str) -> Result<(), PathError> {
        self.close();
        self.pending = None;
        self.state = EnumeratorState::Unopened;

        let pattern = normalize_search_pattern(pattern)?;
        let search = full_search_string(directory, &pattern)?;

        match self.native.find_first(&search) {
            Ok((handle, first)) => {
                debug!(search = %String::from_utf16_lossy(&search), "opened directory search");
                self.handle = Some(handle);
                self.pending = Some(first);
                self.state = EnumeratorState::Iterating;
                Ok(())
            }
            Err(code) if code.is_not_found() => {
                debug!(code = code.code(), "directory search matched nothing");
                self.state = EnumeratorState::Exhausted;
                Ok(())
            }
            Err(code) => {
                self.state = EnumeratorState::Failed;
                Err(PathError::EnumerationFailed(code))
            }
        }
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.native.find_close(handle);
            debug!(state = ?self.state, "closed directory search");
        }
    }

    fn finish(&mut self, state: EnumeratorState) {
        self.state = state;
        self.pending = None;
        self.close();
    }

    fn pull(&mut self) -> Option<Result<FindEntry, PathError>> {
        if self.state != EnumeratorState::Iterating {
            return None;
        }
        if let Some(entry) = self.pending.take() {
            return Some(Ok(entry));
        }

        let handle = match self.handle.as_mut() {
            Some(h) => h,
            None => {
                self.state = EnumeratorState::Exhausted;
                return None;
            }
        };
        match self.native.find_next(handle) {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.finish(EnumeratorState::Exhausted);
                None
            }
            Err(code) => {
                self.finish(EnumeratorState::Failed);
                Some(Err(PathError::EnumerationFailed(code)))
            }
        }
    }
}

impl<N: NativeFs> Iterator for DirectoryEnumerator<N> {
    type Item = Result<FindEntry, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.pull()? {
                Ok(entry) if self.skip_dot_entries && entry.is_dot_entry() => continue,
                item => return Some(item),
            }
        }
    }
}

impl<N: NativeFs> Drop for DirectoryEnumerator<N> {
    fn drop(&mut self) {
        self.close();
    }
}
