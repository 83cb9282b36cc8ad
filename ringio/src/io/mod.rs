//! Ring buffer I/O
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Typed accessors                    │
//! │  - u8/u16/u32, LE and BE            │
//! │  - length-prefixed strings, lines   │
//! └─────────────────────────────────────┘
//!          │ write()/read(), all-or-nothing
//!          ▼
//! ┌─────────────────────────────────────┐
//! │  Buffer (fill/drain engine)         │
//! │  - fill() asks hook to drain        │
//! │  - drain() asks hook to fill        │
//! │  - peek never moves the ring        │
//! └─────────────────────────────────────┘
//!          │ owns              ▲ &mut Ring
//!          ▼                   │
//! ┌──────────────────┐  ┌──────────────────┐
//! │  Ring            │  │  Hook            │
//! │  - owned/borrowed│  │  - FileSource    │
//! │  - wrap copies   │  │  - FileSink      │
//! └──────────────────┘  └──────────────────┘
//! ```

pub mod accessors;
pub mod buffer;
pub mod file;
pub mod hook;
pub mod ring;

pub use accessors::MAX_STR_LEN;
pub use buffer::Buffer;
pub use file::{FileSink, FileSource};
pub use hook::{Hook, NoHook};
pub use ring::{Ring, MIN_CAPACITY};
