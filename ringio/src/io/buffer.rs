//! Fill/drain engine
//!
//! [`Buffer`] owns a [`Ring`] and the [`Hook`] that backs it. Every higher
//! operation goes through [`Buffer::fill`] and [`Buffer::drain`], which move
//! bytes in a loop and call the hook whenever the ring is full (on fill) or
//! empty (on drain). Both return partial counts; they never fail.
//!
//! [`Buffer::write`] and [`Buffer::read`] are the all-or-nothing wrappers:
//! they first ask the hook, in inquiry mode, whether the whole request can
//! eventually be satisfied, and report a [`RingError`] otherwise.
//!
//! # Example
//!
//! ```
//! use ringio::Buffer;
//!
//! let mut buffer = Buffer::new(16);
//! buffer.write(b"hello").unwrap();
//!
//! let peeked = buffer.read(5, false).unwrap();
//! assert_eq!(buffer.bytes_available(), 5);
//!
//! let consumed = buffer.read(5, true).unwrap();
//! assert_eq!(peeked, consumed);
//! assert_eq!(buffer.bytes_available(), 0);
//! ```

use std::fmt;

use super::hook::{Hook, NoHook};
use super::ring::Ring;
use crate::config::BufferConfig;
use crate::error::RingError;

/// Ring buffer driven by a backpressure hook
///
/// # Thread Safety
///
/// None. A buffer is owned and used by exactly one consumer; the hook runs
/// synchronously inside the call that needed it.
pub struct Buffer<'a, H: Hook = NoHook> {
    ring: Ring<'a>,
    hook: H,
    /// Last non-inquiry `fill_request` could not deliver
    exhausted: bool,
    closed: bool,
    total_read: u64,
    total_written: u64,
}

impl Buffer<'static, NoHook> {
    /// Create an in-memory buffer with no backing source or sink.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_ring(Ring::new(capacity), NoHook)
    }

    /// Adopt an owned array whose first `level` bytes are already data.
    ///
    /// # Errors
    /// `InvalidArgument` if `level` exceeds the array length.
    pub fn from_vec(data: Vec<u8>, level: usize) -> Result<Self, RingError> {
        Ok(Self::from_ring(Ring::from_vec(data, level)?, NoHook))
    }
}

impl<'a> Buffer<'a, NoHook> {
    /// Borrow a caller-managed array whose first `level` bytes are already data.
    ///
    /// # Errors
    /// `InvalidArgument` if the array is too small or `level` exceeds it.
    pub fn from_slice(data: &'a mut [u8], level: usize) -> Result<Self, RingError> {
        Ok(Self::from_ring(Ring::from_slice(data, level)?, NoHook))
    }
}

impl<H: Hook> Buffer<'static, H> {
    #[must_use]
    pub fn with_hook(capacity: usize, hook: H) -> Self {
        Self::from_ring(Ring::new(capacity), hook)
    }

    #[must_use]
    pub fn with_config(config: &BufferConfig, hook: H) -> Self {
        Self::with_hook(config.capacity, hook)
    }
}

impl<'a, H: Hook> Buffer<'a, H> {
    #[must_use]
    pub fn from_ring(ring: Ring<'a>, hook: H) -> Self {
        Self {
            ring,
            hook,
            exhausted: false,
            closed: false,
            total_read: 0,
            total_written: 0,
        }
    }

    #[must_use]
    pub fn ring(&self) -> &Ring<'a> {
        &self.ring
    }

    #[must_use]
    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    #[must_use]
    pub fn bytes_available(&self) -> usize {
        self.ring.bytes_available()
    }

    #[must_use]
    pub fn space_available(&self) -> usize {
        self.ring.space_available()
    }

    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.ring.is_owned()
    }

    /// True when the ring is empty and the source reported exhaustion the
    /// last time it was asked for data.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.ring.is_empty() && self.exhausted
    }

    /// Bytes removed from the ring since construction
    #[must_use]
    pub fn total_read(&self) -> u64 {
        self.total_read
    }

    /// Bytes added to the ring since construction
    #[must_use]
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn request_fill(&mut self, min: usize, max: usize) -> bool {
        let before = self.ring.bytes_available();
        let ok = self.hook.fill_request(&mut self.ring, min, max, false);
        let after = self.ring.bytes_available();
        log::trace!("fill_request(min={min}, max={max}) -> {ok}, level {before} -> {after}");

        self.total_written += after.saturating_sub(before) as u64;
        self.exhausted = !ok;
        ok
    }

    fn request_drain(&mut self, min: usize, max: usize) -> bool {
        let before = self.ring.bytes_available();
        let ok = self.hook.drain_request(&mut self.ring, min, max, false);
        let after = self.ring.bytes_available();
        log::trace!("drain_request(min={min}, max={max}) -> {ok}, level {before} -> {after}");

        self.total_read += before.saturating_sub(after) as u64;
        ok
    }

    /// Ask the hook to fill the ring up to capacity.
    ///
    /// Returns the hook's answer. With `min == 0` a file source answers `true`
    /// even when it has nothing left; exhaustion shows up on the next read.
    pub fn prefetch(&mut self) -> bool {
        self.request_fill(0, 0)
    }

    /// Copy as much of `data` as possible into the ring, asking the hook to
    /// drain whenever the ring is full. Returns bytes written.
    pub fn fill(&mut self, data: &[u8]) -> usize {
        let mut written = 0;

        while written < data.len() {
            if self.ring.is_full() {
                let level = self.ring.bytes_available();
                self.request_drain(level, 0);
                if self.ring.is_full() {
                    break;
                }
            }
            written += self.ring.fill(&data[written..]);
        }

        if written > 0 {
            self.total_written += written as u64;
            self.hook.on_data_filled(&data[..written]);
        }
        written
    }

    /// Copy up to `out.len()` bytes out of the ring, asking the hook for more
    /// whenever the ring runs empty. Returns bytes copied.
    ///
    /// With `release == false` the bytes stay in the ring. A peek needs all of
    /// `out` to fit at once, so it returns 0 if the hook cannot top the ring up
    /// to `out.len()` bytes.
    pub fn drain(&mut self, out: &mut [u8], release: bool) -> usize {
        let length = out.len();
        self.drain_inner(Some(out), length, release)
    }

    /// Consume and discard up to `length` bytes. Returns bytes discarded.
    pub fn skip(&mut self, length: usize) -> usize {
        self.drain_inner(None, length, true)
    }

    fn drain_inner(&mut self, mut out: Option<&mut [u8]>, length: usize, release: bool) -> usize {
        if length == 0 {
            return 0;
        }
        if !release {
            return self.peek_inner(out, length);
        }

        let mut read = 0;
        while read < length {
            if self.ring.is_empty() {
                self.request_fill(1, length - read);
                if self.ring.is_empty() {
                    break;
                }
            }
            read += match out.as_deref_mut() {
                Some(buf) => self.ring.drain(&mut buf[read..length]),
                None => self.ring.consume(length - read),
            };
        }

        self.total_read += read as u64;
        read
    }

    fn peek_inner(&mut self, out: Option<&mut [u8]>, length: usize) -> usize {
        let level = self.ring.bytes_available();
        if level < length {
            if self.ring.space_available() < length - level {
                return 0;
            }
            if !self.request_fill(length - level, 0) {
                return 0;
            }
        }

        let n = length.min(self.ring.bytes_available());
        match out {
            Some(buf) => self.ring.peek_at(0, &mut buf[..n]),
            None => n,
        }
    }

    /// Write all of `data` or fail.
    ///
    /// An empty `data` is a successful no-op. If the ring lacks space the
    /// hook is first asked whether it can drain enough; if it says no,
    /// nothing is written.
    ///
    /// # Errors
    /// `InsufficientSpace` if not every byte could be written. The bytes that
    /// did fit stay in the ring.
    pub fn write(&mut self, data: &[u8]) -> Result<(), RingError> {
        if data.is_empty() {
            return Ok(());
        }

        if self.ring.space_available() < data.len()
            && !self.hook.drain_request(&mut self.ring, data.len(), 0, true)
        {
            return Err(RingError::InsufficientSpace {
                requested: data.len(),
                written: 0,
            });
        }

        let written = self.fill(data);
        if written == data.len() {
            Ok(())
        } else {
            Err(RingError::InsufficientSpace {
                requested: data.len(),
                written,
            })
        }
    }

    /// Read exactly `length` bytes into a new vector.
    ///
    /// # Errors
    /// See [`Buffer::read_with_extra`].
    pub fn read(&mut self, length: usize, release: bool) -> Result<Vec<u8>, RingError> {
        self.read_with_extra(length, 0, release)
    }

    /// Read exactly `length` bytes into a new vector of `length + extra_bytes`
    /// bytes. The trailing extra bytes are zero, so `extra_bytes == 1` yields a
    /// NUL-terminated payload.
    ///
    /// # Errors
    /// - `InvalidArgument` for a zero `length`
    /// - `InsufficientData` if the hook says the source cannot cover the
    ///   shortfall (nothing is consumed), or if the source came up short
    ///   during the read (the bytes obtained so far are consumed)
    pub fn read_with_extra(
        &mut self,
        length: usize,
        extra_bytes: usize,
        release: bool,
    ) -> Result<Vec<u8>, RingError> {
        if length == 0 {
            return Err(RingError::InvalidArgument("zero-length read"));
        }
        self.check_readable(length, release)?;

        let mut out = vec![0u8; length + extra_bytes];
        let n = self.drain_inner(Some(&mut out[..length]), length, release);
        if n != length {
            return Err(RingError::InsufficientData {
                requested: length,
                available: n,
            });
        }
        Ok(out)
    }

    /// Fill all of `out` from the ring or fail.
    ///
    /// # Errors
    /// Same as [`Buffer::read_with_extra`].
    pub fn read_into(&mut self, out: &mut [u8], release: bool) -> Result<(), RingError> {
        if out.is_empty() {
            return Err(RingError::InvalidArgument("zero-length read"));
        }
        let length = out.len();
        self.check_readable(length, release)?;

        let n = self.drain(out, release);
        if n != length {
            return Err(RingError::InsufficientData {
                requested: length,
                available: n,
            });
        }
        Ok(())
    }

    fn check_readable(&mut self, length: usize, release: bool) -> Result<(), RingError> {
        let level = self.ring.bytes_available();
        if release && level < length && !self.hook.fill_request(&mut self.ring, length - level, 0, true) {
            return Err(RingError::InsufficientData {
                requested: length,
                available: level,
            });
        }
        Ok(())
    }

    /// Drain the ring through the hook until it is empty.
    ///
    /// # Errors
    /// `Refused` if the hook stopped accepting bytes before the ring emptied.
    pub fn flush(&mut self) -> Result<(), RingError> {
        while !self.ring.is_empty() {
            let level = self.ring.bytes_available();
            if !self.request_drain(level, 0) {
                break;
            }
        }

        if self.ring.is_empty() {
            Ok(())
        } else {
            Err(RingError::Refused)
        }
    }

    /// Flush if the hook is a sink, then let the hook release its resource.
    ///
    /// Unread input is simply dropped. Can be called multiple times; dropping
    /// the buffer calls it too.
    ///
    /// # Errors
    /// The flush error. The hook is closed regardless.
    pub fn close(&mut self) -> Result<(), RingError> {
        if self.closed {
            return Ok(());
        }
        let flushed = if self.hook.drain_request(&mut self.ring, 0, 0, true) {
            self.flush()
        } else {
            Ok(())
        };
        self.hook.close();
        self.closed = true;
        flushed
    }
}

impl<H: Hook> Drop for Buffer<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Buffer dropped with {} unflushed bytes: {e}", self.ring.bytes_available());
        }
    }
}

impl<H: Hook> fmt::Debug for Buffer<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("ring", &self.ring)
            .field("eof", &self.eof())
            .field("closed", &self.closed)
            .field("total_read", &self.total_read)
            .field("total_written", &self.total_written)
            .finish_non_exhaustive()
    }
}

impl<H: Hook> embedded_io::ErrorType for Buffer<'_, H> {
    type Error = RingError;
}

impl<H: Hook> embedded_io::Read for Buffer<'_, H> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.drain(buf, true))
    }
}

impl<H: Hook> embedded_io::Write for Buffer<'_, H> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let written = self.fill(buf);
        if written == 0 && !buf.is_empty() {
            return Err(RingError::InsufficientSpace {
                requested: buf.len(),
                written,
            });
        }
        Ok(written)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Buffer::flush(self)
    }
}
