//! Typed accessors
//!
//! Fixed-width integers in both byte orders, length-prefixed strings and
//! lines, all built on [`Buffer::fill`] and [`Buffer::drain`].
//!
//! Wire format:
//! - 8-bit values are a single byte
//! - `u16`/`u32` without suffix are little-endian, `_be` variants big-endian
//! - a string is one length byte (0..=255) followed by the raw payload
//! - a line ends with a single terminator byte, `\n` by default
//!
//! Every numeric read comes in two forms. `try_read_*` returns a
//! [`RingError`] on a short read. `read_*` returns 0 instead, so a short
//! read and a genuine zero look the same; callers that must tell them apart
//! use the `try_` form or check [`Buffer::eof`].
//!
//! A short consuming read still consumes whatever bytes it obtained.

use super::buffer::Buffer;
use super::hook::Hook;
use crate::error::RingError;

/// Longest payload a length-prefixed string can carry
pub const MAX_STR_LEN: usize = 255;

impl<H: Hook> Buffer<'_, H> {
    fn write_array(&mut self, bytes: &[u8]) -> Result<(), RingError> {
        let written = self.fill(bytes);
        if written == bytes.len() {
            Ok(())
        } else {
            Err(RingError::InsufficientSpace {
                requested: bytes.len(),
                written,
            })
        }
    }

    fn read_array<const N: usize>(&mut self, peek: bool) -> Result<[u8; N], RingError> {
        let mut tmp = [0u8; N];
        let n = self.drain(&mut tmp, !peek);
        if n == N {
            Ok(tmp)
        } else {
            Err(RingError::InsufficientData {
                requested: N,
                available: n,
            })
        }
    }

    /// # Errors
    /// `InsufficientSpace` if the byte could not be written.
    pub fn write_u8(&mut self, value: u8) -> Result<(), RingError> {
        self.write_array(&[value])
    }

    /// # Errors
    /// `InsufficientSpace` if not all bytes could be written.
    pub fn write_u16(&mut self, value: u16) -> Result<(), RingError> {
        self.write_array(&value.to_le_bytes())
    }

    /// # Errors
    /// `InsufficientSpace` if not all bytes could be written.
    pub fn write_u16_be(&mut self, value: u16) -> Result<(), RingError> {
        self.write_array(&value.to_be_bytes())
    }

    /// # Errors
    /// `InsufficientSpace` if not all bytes could be written.
    pub fn write_u32(&mut self, value: u32) -> Result<(), RingError> {
        self.write_array(&value.to_le_bytes())
    }

    /// # Errors
    /// `InsufficientSpace` if not all bytes could be written.
    pub fn write_u32_be(&mut self, value: u32) -> Result<(), RingError> {
        self.write_array(&value.to_be_bytes())
    }

    /// Write a length byte followed by the payload.
    ///
    /// A failure after the length byte went out is not rolled back.
    ///
    /// # Errors
    /// - `InvalidArgument` if the payload is longer than [`MAX_STR_LEN`];
    ///   nothing is written
    /// - `InsufficientSpace` from either write
    pub fn write_str(&mut self, value: impl AsRef<[u8]>) -> Result<(), RingError> {
        let value = value.as_ref();
        let Ok(length) = u8::try_from(value.len()) else {
            return Err(RingError::InvalidArgument("string longer than 255 bytes"));
        };
        self.write_u8(length)?;
        self.write(value)
    }

    /// Read a length byte followed by the payload.
    ///
    /// # Errors
    /// `InsufficientData` if the length byte or the payload is missing.
    pub fn read_str(&mut self) -> Result<Vec<u8>, RingError> {
        let length = usize::from(self.try_read_u8(false)?);
        if length == 0 {
            return Ok(Vec::new());
        }
        self.read(length, true)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_u8(&mut self, peek: bool) -> Result<u8, RingError> {
        self.read_array::<1>(peek).map(|b| b[0])
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_i8(&mut self, peek: bool) -> Result<i8, RingError> {
        self.read_array::<1>(peek).map(i8::from_le_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_u16(&mut self, peek: bool) -> Result<u16, RingError> {
        self.read_array(peek).map(u16::from_le_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_i16(&mut self, peek: bool) -> Result<i16, RingError> {
        self.read_array(peek).map(i16::from_le_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_u16_be(&mut self, peek: bool) -> Result<u16, RingError> {
        self.read_array(peek).map(u16::from_be_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_i16_be(&mut self, peek: bool) -> Result<i16, RingError> {
        self.read_array(peek).map(i16::from_be_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_u32(&mut self, peek: bool) -> Result<u32, RingError> {
        self.read_array(peek).map(u32::from_le_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_i32(&mut self, peek: bool) -> Result<i32, RingError> {
        self.read_array(peek).map(i32::from_le_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_u32_be(&mut self, peek: bool) -> Result<u32, RingError> {
        self.read_array(peek).map(u32::from_be_bytes)
    }

    /// # Errors
    /// `InsufficientData` on a short read.
    pub fn try_read_i32_be(&mut self, peek: bool) -> Result<i32, RingError> {
        self.read_array(peek).map(i32::from_be_bytes)
    }

    #[must_use]
    pub fn read_u8(&mut self, peek: bool) -> u8 {
        self.try_read_u8(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_i8(&mut self, peek: bool) -> i8 {
        self.try_read_i8(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_u16(&mut self, peek: bool) -> u16 {
        self.try_read_u16(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_i16(&mut self, peek: bool) -> i16 {
        self.try_read_i16(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_u16_be(&mut self, peek: bool) -> u16 {
        self.try_read_u16_be(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_i16_be(&mut self, peek: bool) -> i16 {
        self.try_read_i16_be(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_u32(&mut self, peek: bool) -> u32 {
        self.try_read_u32(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_i32(&mut self, peek: bool) -> i32 {
        self.try_read_i32(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_u32_be(&mut self, peek: bool) -> u32 {
        self.try_read_u32_be(peek).unwrap_or_default()
    }

    #[must_use]
    pub fn read_i32_be(&mut self, peek: bool) -> i32 {
        self.try_read_i32_be(peek).unwrap_or_default()
    }

    /// Read a `\n`-terminated line into `buf`. See [`Buffer::read_line_until`].
    pub fn read_line<'b>(&mut self, buf: &'b mut [u8]) -> Option<&'b [u8]> {
        self.read_line_until(buf, b'\n')
    }

    /// Read bytes into `buf` until `terminator`, until `buf.len() - 1` bytes
    /// are captured, or until the source runs dry. A NUL byte is stored after
    /// the captured bytes; the returned slice excludes it and the terminator.
    ///
    /// Returns `None` only if no byte was captured and the source is
    /// exhausted, or if `buf` is empty. A last line without terminator is
    /// returned like any other.
    pub fn read_line_until<'b>(&mut self, buf: &'b mut [u8], terminator: u8) -> Option<&'b [u8]> {
        let limit = buf.len().checked_sub(1)?;

        let mut n = 0;
        while n < limit {
            match self.try_read_u8(false) {
                Ok(ch) if ch == terminator => break,
                Ok(ch) => {
                    buf[n] = ch;
                    n += 1;
                }
                Err(_) => break,
            }
        }

        if n == 0 && self.eof() {
            return None;
        }
        buf[n] = 0;
        Some(&buf[..n])
    }
}
