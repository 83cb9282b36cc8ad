//! Backpressure hook contract
//!
//! A [`Buffer`](super::Buffer) calls its hook when the ring alone cannot
//! satisfy a request: `fill_request` to pull more input from a source,
//! `drain_request` to push pending output to a sink. The hook does the real
//! I/O, including any waiting, and moves bytes through the `&mut Ring` it is
//! handed. The engine itself never blocks.
//!
//! In both requests `max == 0` means "no upper bound". With `inquiry == true`
//! the hook must not perform I/O; it only reports whether `min` bytes could
//! be satisfied.

use super::ring::Ring;

pub trait Hook {
    /// Make at least `min` and at most `max` more bytes available in `ring`.
    ///
    /// Returns `false` if `min` cannot be satisfied.
    fn fill_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        let _ = (ring, min, max, inquiry);
        false
    }

    /// Write at least `min` and at most `max` bytes out of `ring`.
    ///
    /// Returns `false` if `min` cannot be satisfied.
    fn drain_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        let _ = (ring, min, max, inquiry);
        false
    }

    /// Observe bytes that were just filled into the ring.
    fn on_data_filled(&mut self, data: &[u8]) {
        let _ = data;
    }

    /// Release the underlying resource. Called once, after the final flush.
    fn close(&mut self) {}
}

/// Hook for plain in-memory buffers: refuses every request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHook;

impl Hook for NoHook {}

impl<H: Hook + ?Sized> Hook for &mut H {
    fn fill_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        (**self).fill_request(ring, min, max, inquiry)
    }

    fn drain_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        (**self).drain_request(ring, min, max, inquiry)
    }

    fn on_data_filled(&mut self, data: &[u8]) {
        (**self).on_data_filled(data);
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<H: Hook + ?Sized> Hook for Box<H> {
    fn fill_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        (**self).fill_request(ring, min, max, inquiry)
    }

    fn drain_request(&mut self, ring: &mut Ring<'_>, min: usize, max: usize, inquiry: bool) -> bool {
        (**self).drain_request(ring, min, max, inquiry)
    }

    fn on_data_filled(&mut self, data: &[u8]) {
        (**self).on_data_filled(data);
    }

    fn close(&mut self) {
        (**self).close();
    }
}
