//! File-backed stream adapters
//!
//! [`FileSource`] pulls from any `Read + Seek` handle when the ring runs
//! empty; [`FileSink`] pushes to any `Write` handle when the ring fills up or
//! is flushed. Both move data in chunks of
//! [`BufferConfig::chunk_size`](crate::BufferConfig) bytes.
//!
//! Handle ownership follows the type: an adapter over `File` closes the file
//! when it is closed or dropped, an adapter over `&mut File` leaves the
//! caller's file open.
//!
//! # Example
//!
//! ```no_run
//! use ringio::{BufferConfig, FileSink, FileSource};
//!
//! let config = BufferConfig::default();
//! let mut input = FileSource::open("in.bin").unwrap().into_buffer(&config);
//! let mut output = FileSink::create("out.bin").unwrap().into_buffer(&config);
//!
//! let magic = input.read_u32_be(false);
//! output.write_u32(magic).unwrap();
//! output.close().unwrap();
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::buffer::Buffer;
use super::hook::Hook;
use super::ring::Ring;
use crate::config::{BufferConfig, DEFAULT_CHUNK_SIZE};

/// Source hook reading from a seekable handle
pub struct FileSource<R: Read + Seek> {
    reader: Option<R>,
    /// Bytes between the handle position and its end
    remaining: u64,
    scratch: Vec<u8>,
    error: Option<io::Error>,
}

impl FileSource<File> {
    /// Open `path` for reading.
    ///
    /// # Errors
    /// Any error from opening or seeking the file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        log::debug!("FileSource: opening {}", path.display());
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> FileSource<R> {
    /// Read from the handle's current position to its end.
    ///
    /// # Errors
    /// Any error from seeking the handle to measure its remaining size.
    pub fn new(mut reader: R) -> io::Result<Self> {
        let pos = reader.stream_position()?;
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(pos))?;

        Ok(Self {
            reader: Some(reader),
            remaining: end.saturating_sub(pos),
            scratch: vec![0u8; DEFAULT_CHUNK_SIZE],
            error: None,
        })
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.scratch = vec![0u8; chunk_size.max(1)];
        self
    }

    /// Wrap into a buffer sized by `config` and prefetch the first ring-full.
    #[must_use]
    pub fn into_buffer(self, config: &BufferConfig) -> Buffer<'static, Self> {
        let mut buffer = Buffer::with_config(config, self.with_chunk_size(config.chunk_size));
        buffer.prefetch();
        buffer
    }

    /// Bytes not yet pulled from the handle
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Take the last I/O error, if any. Errors make requests fail but are
    /// otherwise only logged.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read + Seek> Hook for FileSource<R> {
    fn fill_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        let Some(reader) = self.reader.as_mut() else {
            return false;
        };
        if self.remaining < min as u64 {
            return false;
        }
        if inquiry {
            return true;
        }

        let mut max = if max == 0 {
            ring.space_available()
        } else {
            max.min(ring.space_available())
        };
        let mut min = min;

        while max > 0 && self.remaining > 0 {
            let want = max.min(self.scratch.len());
            let n = match reader.read(&mut self.scratch[..want]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("FileSource: read failed: {e}");
                    self.error = Some(e);
                    break;
                }
            };

            ring.fill(&self.scratch[..n]);
            self.remaining = self.remaining.saturating_sub(n as u64);
            max -= n;
            min = min.saturating_sub(n);
        }

        min == 0
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            log::debug!("FileSource: closed with {} bytes unread", self.remaining);
        }
    }
}

impl<R: Read + Seek> std::fmt::Debug for FileSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("open", &self.is_open())
            .field("remaining", &self.remaining)
            .field("chunk_size", &self.scratch.len())
            .finish_non_exhaustive()
    }
}

/// Sink hook writing to any handle
pub struct FileSink<W: Write> {
    writer: Option<W>,
    scratch: Vec<u8>,
    error: Option<io::Error>,
}

impl FileSink<File> {
    /// Create or truncate `path` for writing.
    ///
    /// # Errors
    /// Any error from creating the file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        log::debug!("FileSink: creating {}", path.display());
        Ok(Self::new(File::create(path)?))
    }

    /// Open `path` for appending, creating it if needed.
    ///
    /// # Errors
    /// Any error from opening the file.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        log::debug!("FileSink: appending to {}", path.display());
        Ok(Self::new(OpenOptions::new().append(true).create(true).open(path)?))
    }
}

impl<W: Write> FileSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            scratch: vec![0u8; DEFAULT_CHUNK_SIZE],
            error: None,
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.scratch = vec![0u8; chunk_size.max(1)];
        self
    }

    #[must_use]
    pub fn into_buffer(self, config: &BufferConfig) -> Buffer<'static, Self> {
        Buffer::with_config(config, self.with_chunk_size(config.chunk_size))
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// The underlying handle, until the sink is closed
    #[must_use]
    pub fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref()
    }

    /// Take the last I/O error, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<W: Write> Hook for FileSink<W> {
    fn drain_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        let Some(writer) = self.writer.as_mut() else {
            return false;
        };
        if inquiry {
            return true;
        }

        let mut max = if max == 0 { ring.bytes_available() } else { max };
        let mut min = min;

        while max > 0 {
            let want = max.min(self.scratch.len());
            let n = ring.peek_at(0, &mut self.scratch[..want]);
            if n == 0 {
                break;
            }
            // Consume only what the writer accepted
            let k = match writer.write(&self.scratch[..n]) {
                Ok(0) => {
                    log::warn!("FileSink: writer accepted no bytes");
                    self.error = Some(io::ErrorKind::WriteZero.into());
                    return false;
                }
                Ok(k) => k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("FileSink: write failed: {e}");
                    self.error = Some(e);
                    return false;
                }
            };
            ring.consume(k);
            max -= k;
            min = min.saturating_sub(k);
        }

        min == 0
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                log::warn!("FileSink: flush on close failed: {e}");
                self.error = Some(e);
            }
            log::debug!("FileSink: closed");
        }
    }
}

impl<W: Write> std::fmt::Debug for FileSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("open", &self.is_open())
            .field("chunk_size", &self.scratch.len())
            .finish_non_exhaustive()
    }
}
