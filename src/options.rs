use crate::{error::Error, Result};

/// How often a failing read is retried before giving up
pub const MAX_READ_ATTEMPTS: usize = 10;

/// Capacity of the first read of a virtual file. Doubled whenever the file doesn't fit.
pub const VIRTUAL_INITIAL_CAPACITY: usize = 2048;

/// Tuning knobs for reading a source into memory.
///
/// # Default
///
/// `max_attempts = 10`, `initial_capacity = 2048`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Upper bound of read attempts, shared by the normal and the virtual read path.
    pub max_attempts: usize,

    /// Size of the first buffer used to read a virtual file.
    pub initial_capacity: usize,
}

impl ReadOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[inline]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Returns an error if the options would never allow a read to succeed
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidArgument("max_attempts must be at least 1"));
        }

        // A zero capacity would never grow when doubled
        if self.initial_capacity == 0 {
            return Err(Error::InvalidArgument("initial_capacity must be at least 1"));
        }

        Ok(())
    }
}

impl Default for ReadOptions {
    #[inline]
    fn default() -> Self {
        Self {
            max_attempts: MAX_READ_ATTEMPTS,
            initial_capacity: VIRTUAL_INITIAL_CAPACITY,
        }
    }
}
