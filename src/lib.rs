//! Reads and writes typed values (fixed-width integers and floats in either byte order, strings,
//! null-terminated strings and raw byte runs) at a movable cursor within a byte buffer.
//!
//! [`BufferReader`] decodes values from a borrowed slice and rejects any read or seek that would
//! leave the bounds of the slice. [`BufferWriter`] encodes values into a buffer that it owns, and
//! grows that buffer with zero bytes whenever a write or seek reaches outside it.
//!
//! Both sides share one vocabulary: [`Kind`] names a wire kind, [`ReadSpec`] and [`WriteSpec`]
//! describe one value to read or write, and [`Value`] holds a decoded value. Strings default to
//! UTF-8; see [`Encoding`] for the others.
//!
//! ```
//! use cursor_buffer::{BufferReader, BufferWriter, ReadSpec, Value, WriteSpec};
//!
//! let mut w = BufferWriter::new();
//! w.write(WriteSpec::UInt32LE(1782))
//!     .write(WriteSpec::string_nt("hello"))
//!     .write(WriteSpec::string("world"));
//!
//! let data = w.buffer();
//! let mut r = BufferReader::new(&data);
//! assert_eq!(r.read(ReadSpec::UInt32LE)?, Value::UInt32(1782));
//! assert_eq!(r.read(ReadSpec::string_nt())?.as_str(), Some("hello"));
//! assert_eq!(r.read(ReadSpec::string())?.as_str(), Some("world"));
//! assert!(r.remaining().is_empty());
//! # Ok::<(), cursor_buffer::ReaderError>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod encoding;
mod reader;
mod value;
mod writer;


pub use encoding::Encoding;
pub use reader::{BufferReader, ReaderError, Result};
pub use value::{Kind, ReadSpec, Value, WriteSpec};
pub use writer::BufferWriter;

/// Resolves a cursor move to a target position, which may be negative or past `len`.
///
/// Relative moves add `delta` to `position`. Absolute moves treat a non-negative `delta` as a
/// position from the start and a negative `delta` as a position counted back from `len`.
/// Saturates instead of overflowing.
pub(crate) fn resolve_offset(position: usize, len: usize, delta: isize, absolute: bool) -> isize {
    let base = match (absolute, delta < 0) {
        (false, _) => position,
        (true, false) => 0,
        (true, true) => len,
    };
    // Slice and Vec lengths never exceed isize::MAX.
    isize::try_from(base)
        .unwrap_or(isize::MAX)
        .saturating_add(delta)
}
