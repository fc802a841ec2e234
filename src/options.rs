// options.rs
use crate::path::MAX_PATH;

/// How the resolver sizes its first buffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizingStrategy {
    /// Seed at `initial_capacity` and grow when the primitive asks for more
    #[default]
    Guess,
    /// Ask the primitive for the required size first, then allocate exactly
    Query,
}

/// Configuration options for path normalization
///
/// This struct controls trailing-separator policy, whether the
/// extended-length prefix is applied, and how resolution buffers are sized.
#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    /// Accept a trailing separator on input (and drop it from the result)
    /// instead of producing the empty sentinel
    pub allow_trailing_separator: bool,

    /// Rewrite resolved paths to `\\?\` / `\\?\UNC\` form
    pub add_extended_prefix: bool,

    /// Capacity of the first resolution buffer, in UTF-16 code units
    pub initial_capacity: usize,

    /// Buffer sizing strategy for the full-path primitive
    pub sizing: SizingStrategy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            allow_trailing_separator: false,
            add_extended_prefix: true,
            initial_capacity: MAX_PATH,
            sizing: SizingStrategy::Guess,
        }
    }
}

/// Builder for NormalizeOptions for fluent configuration
pub struct NormalizeOptionsBuilder(NormalizeOptions);

impl Default for NormalizeOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizeOptionsBuilder {
    /// Creates a new builder with default options
    pub fn new() -> Self {
        Self(NormalizeOptions::default())
    }

    /// Sets whether a trailing separator is accepted
    pub fn allow_trailing_separator(mut self, v: bool) -> Self {
        self.0.allow_trailing_separator = v;
        self
    }

    /// Sets whether the extended-length prefix is added
    pub fn add_extended_prefix(mut self, v: bool) -> Self {
        self.0.add_extended_prefix = v;
        self
    }

    /// Sets the capacity of the first resolution buffer
    pub fn initial_capacity(mut self, n: usize) -> Self {
        self.0.initial_capacity = n;
        self
    }

    /// Sets the buffer sizing strategy
    pub fn sizing(mut self, s: SizingStrategy) -> Self {
        self.0.sizing = s;
        self
    }

    /// Builds the final NormalizeOptions instance
    pub fn build(self) -> NormalizeOptions {
        self.0
    }
}

/// Retention limits for a [`BufferPool`](crate::pool::BufferPool)
#[derive(Clone, Debug)]
pub struct PoolOptions {
    /// Maximum number of idle buffers kept for reuse
    pub max_retained: usize,

    /// Buffers larger than this (in code units) are dropped on return
    pub max_retained_capacity: usize,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_retained: 64,
            max_retained_capacity: 32 * 1024,
        }
    }
}
