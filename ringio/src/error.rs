//! Error type for ring buffer operations
//!
//! The engine itself never fails: `fill` and `drain` report how many bytes
//! they moved. The all-or-nothing layer on top of them (`write`, `read`,
//! typed accessors) turns a shortfall into a [`RingError`].

/// Error type for all-or-nothing buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// Fewer bytes could be read than were requested
    #[error("insufficient data: requested {requested} bytes, got {available}")]
    InsufficientData { requested: usize, available: usize },

    /// Fewer bytes could be written than were requested
    #[error("insufficient space: requested {requested} bytes, wrote {written}")]
    InsufficientSpace { requested: usize, written: usize },

    /// The hook refused a fill or drain request
    #[error("request refused by hook")]
    Refused,

    /// The call itself was malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl embedded_io::Error for RingError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            RingError::InsufficientData { .. } => embedded_io::ErrorKind::Other,
            // Same mapping as ENOSPC
            RingError::InsufficientSpace { .. } => embedded_io::ErrorKind::OutOfMemory,
            RingError::Refused => embedded_io::ErrorKind::BrokenPipe,
            RingError::InvalidArgument(_) => embedded_io::ErrorKind::InvalidInput,
        }
    }
}
