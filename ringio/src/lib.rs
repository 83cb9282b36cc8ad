pub mod config;
pub mod error;
pub mod io;

// Re-export buffer types for convenience
pub use io::{Buffer, Hook, NoHook, Ring, MAX_STR_LEN, MIN_CAPACITY};

// Re-export file adapters
pub use io::{FileSink, FileSource};

pub use config::BufferConfig;
pub use error::RingError;
