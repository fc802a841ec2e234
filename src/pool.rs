// pool.rs
use crate::options::PoolOptions;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Counters for pool usage monitoring
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    pub rented: u64,
    pub returned: u64,
    pub allocated: u64,
    pub reused: u64,
    /// Idle buffers currently held by the pool
    pub retained: usize,
    /// Buffers currently rented and not yet returned
    pub outstanding: usize,
}

#[derive(Debug, Default)]
struct PoolState {
    free: Vec<Vec<u16>>,
    metrics: PoolMetrics,
}

/// A thread-safe pool of growable UTF-16 buffers
///
/// One pool is meant to be built at startup and shared by reference with
/// every component that normalizes paths. A rented buffer belongs to exactly
/// one [`PooledBuffer`] holder until it is released.
#[derive(Debug)]
pub struct BufferPool {
    state: Mutex<PoolState>,
    options: PoolOptions,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(PoolOptions::default())
    }
}

impl BufferPool {
    /// Creates an empty pool with the given retention limits
    pub fn new(options: PoolOptions) -> Self {
        Self {
            state: Mutex::new(PoolState::default()),
            options,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rents a zero-filled buffer of exactly `min_len` code units
    ///
    /// An idle buffer whose capacity is large enough is reused; otherwise
    /// a new one is allocated.
    ///
    /// # Arguments
    ///
    /// * `min_len` - Number of code units the caller will write
    ///
    /// # Returns
    ///
    /// A buffer of length `min_len`. Hand it back with
    /// [`give_back`](Self::give_back), or rent through a [`PooledBuffer`]
    /// so that happens on drop.
    pub fn rent(&self, min_len: usize) -> Vec<u16> {
        let mut state = self.lock();
        state.metrics.rented += 1;
        state.metrics.outstanding += 1;

        let mut buf = match state.free.iter().position(|b| b.capacity() >= min_len) {
            Some(i) => {
                state.metrics.reused += 1;
                state.free.swap_remove(i)
            }
            None => {
                state.metrics.allocated += 1;
                Vec::with_capacity(min_len)
            }
        };
        state.metrics.retained = state.free.len();
        drop(state);

        buf.clear();
        buf.resize(min_len, 0);
        buf
    }

    /// Returns a buffer previously obtained from [`rent`](Self::rent)
    pub fn give_back(&self, buf: Vec<u16>) {
        let mut state = self.lock();
        state.metrics.returned += 1;
        state.metrics.outstanding = state.metrics.outstanding.saturating_sub(1);

        if state.free.len() < self.options.max_retained
            && buf.capacity() <= self.options.max_retained_capacity
        {
            state.free.push(buf);
        }
        state.metrics.retained = state.free.len();
    }

    /// Returns a snapshot of the pool counters
    pub fn metrics(&self) -> PoolMetrics {
        self.lock().metrics.clone()
    }

    /// Drops every idle buffer
    pub fn clear(&self) {
        let mut state = self.lock();
        state.free.clear();
        state.metrics.retained = 0;
    }
}

/// Holder of at most one rented buffer
///
/// Renting again returns the held buffer to the pool first, and dropping the
/// holder releases whatever it still owns.
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buffer: Option<Vec<u16>>,
}

impl<'p> PooledBuffer<'p> {
    /// Creates a holder that owns nothing yet
    pub fn new(pool: &'p BufferPool) -> Self {
        Self { pool, buffer: None }
    }

    /// Rents a buffer of `min_len` code units, releasing any held one first
    pub fn rent(&mut self, min_len: usize) -> &mut [u16] {
        self.release();
        self.buffer.insert(self.pool.rent(min_len)).as_mut_slice()
    }

    /// Whether the holder currently owns a buffer
    pub fn is_rented(&self) -> bool {
        self.buffer.is_some()
    }

    /// The held buffer, or an empty slice when nothing is rented
    pub fn as_slice(&self) -> &[u16] {
        self.buffer.as_deref().unwrap_or(&[])
    }

    /// Mutable view of the held buffer, or an empty slice when nothing is
    /// rented
    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        self.buffer.as_deref_mut().unwrap_or(&mut [])
    }

    /// Returns the held buffer to the pool; a no-op when nothing is held
    pub fn release(&mut self) {
        if let Some(buf) = self.buffer.take() {
            self.pool.give_back(buf);
        }
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
