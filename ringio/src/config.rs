//! Buffer configuration

use crate::io::ring::MIN_CAPACITY;

/// Default ring capacity for streams
pub const DEFAULT_CAPACITY: usize = 1024;

/// Default number of bytes an adapter moves per I/O call
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Sizing for a ring and for the adapter feeding or draining it
///
/// # Example
///
/// ```
/// use ringio::BufferConfig;
///
/// let config = BufferConfig::default().with_capacity(4).with_chunk_size(0);
/// assert_eq!(config.capacity, 16);
/// assert_eq!(config.chunk_size, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Ring capacity in bytes, never below [`MIN_CAPACITY`]
    pub capacity: usize,
    /// Bytes per read/write call issued by file adapters, never zero
    pub chunk_size: usize,
}

impl BufferConfig {
    #[must_use]
    pub fn new(capacity: usize, chunk_size: usize) -> Self {
        Self {
            capacity: capacity.max(MIN_CAPACITY),
            chunk_size: chunk_size.max(1),
        }
    }

    #[must_use]
    pub fn with_capacity(self, capacity: usize) -> Self {
        Self::new(capacity, self.chunk_size)
    }

    #[must_use]
    pub fn with_chunk_size(self, chunk_size: usize) -> Self {
        Self::new(self.capacity, chunk_size)
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_CHUNK_SIZE)
    }
}
