//! Ring store
//!
//! Fixed-capacity circular byte array plus bookkeeping. This layer knows
//! nothing about hooks: [`Ring::fill`] and [`Ring::drain`] move as many bytes
//! as fit right now and return. Hooks receive a `&mut Ring` to push or pull
//! bytes while the owning [`Buffer`](super::Buffer) is waiting on them.
//!
//! Invariant: `top == (bottom - level) mod capacity`, both offsets are in
//! `[0, capacity)`. `level` tells empty from full when `top == bottom`.

use std::ops::{Deref, DerefMut};

use crate::error::RingError;

/// Smallest ring capacity; smaller requests are clamped up
pub const MIN_CAPACITY: usize = 16;

/// Backing array of a ring
enum Storage<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a mut [u8]),
}

impl Deref for Storage<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Owned(data) => data,
            Storage::Borrowed(data) => data,
        }
    }
}

impl DerefMut for Storage<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(data) => data,
            Storage::Borrowed(data) => data,
        }
    }
}

/// Fixed-capacity circular byte store
pub struct Ring<'a> {
    storage: Storage<'a>,
    level: usize,
    /// Next byte to drain
    top: usize,
    /// Next free slot to fill
    bottom: usize,
}

impl Ring<'static> {
    /// Allocate an empty ring. Capacities below [`MIN_CAPACITY`] are clamped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            storage: Storage::Owned(vec![0u8; capacity].into_boxed_slice()),
            level: 0,
            top: 0,
            bottom: 0,
        }
    }

    /// Adopt an owned array whose first `level` bytes are already valid data.
    ///
    /// Arrays shorter than [`MIN_CAPACITY`] are zero-extended.
    ///
    /// # Errors
    /// `InvalidArgument` if `level` exceeds the array length.
    pub fn from_vec(mut data: Vec<u8>, level: usize) -> Result<Self, RingError> {
        if level > data.len() {
            return Err(RingError::InvalidArgument("level exceeds capacity"));
        }
        if data.len() < MIN_CAPACITY {
            data.resize(MIN_CAPACITY, 0);
        }
        Ok(Self::with_storage(Storage::Owned(data.into_boxed_slice()), level))
    }
}

impl<'a> Ring<'a> {
    /// Borrow a caller-managed array whose first `level` bytes are valid data.
    ///
    /// The ring never releases borrowed storage.
    ///
    /// # Errors
    /// `InvalidArgument` if the array is shorter than [`MIN_CAPACITY`] or
    /// `level` exceeds its length.
    pub fn from_slice(data: &'a mut [u8], level: usize) -> Result<Self, RingError> {
        if data.len() < MIN_CAPACITY {
            return Err(RingError::InvalidArgument("borrowed storage below minimum capacity"));
        }
        if level > data.len() {
            return Err(RingError::InvalidArgument("level exceeds capacity"));
        }
        Ok(Self::with_storage(Storage::Borrowed(data), level))
    }

    fn with_storage(storage: Storage<'a>, level: usize) -> Self {
        let bottom = if level == storage.len() { 0 } else { level };
        Self {
            storage,
            level,
            top: 0,
            bottom,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of bytes currently held
    #[must_use]
    pub fn bytes_available(&self) -> usize {
        self.level
    }

    /// Number of free slots
    #[must_use]
    pub fn space_available(&self) -> usize {
        self.capacity() - self.level
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.level == self.capacity()
    }

    /// Whether the ring releases its storage when dropped
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    #[must_use]
    pub fn top(&self) -> usize {
        self.top
    }

    #[must_use]
    pub fn bottom(&self) -> usize {
        self.bottom
    }

    /// Copy as much of `data` as fits into free space. Returns bytes written.
    pub fn fill(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.space_available());
        if n == 0 {
            return 0;
        }

        let capacity = self.capacity();
        let bottom = self.bottom;
        if bottom + n > capacity {
            let first = capacity - bottom;
            self.storage[bottom..].copy_from_slice(&data[..first]);
            self.storage[..n - first].copy_from_slice(&data[first..n]);
        } else {
            self.storage[bottom..bottom + n].copy_from_slice(&data[..n]);
        }

        self.bottom = (bottom + n) % capacity;
        self.level += n;
        n
    }

    /// Copy held bytes starting `offset` bytes past `top` into `out`, without
    /// consuming them. Returns bytes copied.
    #[must_use]
    pub fn peek_at(&self, offset: usize, out: &mut [u8]) -> usize {
        if offset >= self.level {
            return 0;
        }
        let n = out.len().min(self.level - offset);
        let capacity = self.capacity();
        let start = (self.top + offset) % capacity;

        if start + n > capacity {
            let first = capacity - start;
            out[..first].copy_from_slice(&self.storage[start..]);
            out[first..n].copy_from_slice(&self.storage[..n - first]);
        } else {
            out[..n].copy_from_slice(&self.storage[start..start + n]);
        }
        n
    }

    /// Drop up to `length` bytes from the front. Returns bytes dropped.
    pub fn consume(&mut self, length: usize) -> usize {
        let n = length.min(self.level);
        self.top = (self.top + n) % self.capacity();
        self.level -= n;
        n
    }

    /// Move up to `out.len()` bytes out of the ring. Returns bytes read.
    pub fn drain(&mut self, out: &mut [u8]) -> usize {
        let n = self.peek_at(0, out);
        self.consume(n)
    }
}

impl std::fmt::Debug for Ring<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &self.capacity())
            .field("level", &self.level)
            .field("top", &self.top)
            .field("bottom", &self.bottom)
            .field("owned", &self.is_owned())
            .finish()
    }
}
