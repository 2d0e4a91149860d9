use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;

use crate::{resolve_offset, Encoding, ReadSpec, Value};

/// Result type for `BufferReader`
pub type Result<T> = core::result::Result<T, ReaderError>;

/// Reads typed values from a slice of bytes, at a cursor that the caller can move.
///
/// Each `read_*` method decodes one value starting at the cursor and, on success, advances the
/// cursor by exactly the number of bytes consumed. A read that would run past the end of the data
/// fails and leaves the cursor where it was, so the reader stays usable after any error.
///
/// The cursor always satisfies `0 <= position <= len`. Moving it exactly to the end is allowed;
/// `remaining()` is then empty.
///
/// ```
/// use cursor_buffer::{BufferReader, ReadSpec, Value};
///
/// let mut r = BufferReader::new(b"\x2a\x00hi\x00rest");
/// assert_eq!(r.read_u16_le(), Ok(42));
/// assert_eq!(r.read(ReadSpec::string_nt()), Ok(Value::String("hi".into())));
/// assert_eq!(r.remaining(), b"rest");
/// ```
#[derive(Clone, Debug)]
pub struct BufferReader<'a> {
    data: &'a [u8],
    position: usize,
    encoding: Encoding,
}

impl<'a> BufferReader<'a> {
    /// Constructor. The cursor starts at 0 and strings default to UTF-8.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            encoding: Encoding::Utf8,
        }
    }

    /// Sets the encoding used by string reads that do not name one.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The encoding used by string reads that do not name one.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The entire input, regardless of the cursor.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Length of the entire input.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The cursor, in bytes from the start of the input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The bytes from the cursor to the end of the input. Does not move the cursor.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Number of bytes from the cursor to the end of the input.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.position
    }

    /// Moves the cursor by `delta` bytes relative to its current position.
    ///
    /// Fails with `ReaderError::OffsetOutOfBounds`, leaving the cursor unchanged, if the target
    /// falls outside `[0, len]`.
    pub fn offset(&mut self, delta: isize) -> Result<&mut Self> {
        self.seek(delta, false)
    }

    /// Moves the cursor to an absolute position. A non-negative `delta` counts from the start of
    /// the input; a negative `delta` counts back from the end, so `-1` is the last byte.
    ///
    /// Fails with `ReaderError::OffsetOutOfBounds`, leaving the cursor unchanged, if the target
    /// falls outside `[0, len]`.
    pub fn offset_absolute(&mut self, delta: isize) -> Result<&mut Self> {
        self.seek(delta, true)
    }

    fn seek(&mut self, delta: isize, absolute: bool) -> Result<&mut Self> {
        let len = self.data.len();
        let target = resolve_offset(self.position, len, delta, absolute);
        match usize::try_from(target) {
            Ok(target) if target <= len => {
                self.position = target;
                Ok(self)
            }
            _ => {
                trace!(position = self.position, delta, absolute, len, "offset out of bounds");
                Err(ReaderError::OffsetOutOfBounds {
                    position: self.position,
                    delta,
                    absolute,
                    len,
                })
            }
        }
    }

    /// Decodes one value described by `spec`.
    pub fn read(&mut self, spec: ReadSpec) -> Result<Value<'a>> {
        Ok(match spec {
            ReadSpec::Int8 => Value::Int8(self.read_i8()?),
            ReadSpec::UInt8 => Value::UInt8(self.read_u8()?),
            ReadSpec::Int16LE => Value::Int16(self.read_i16_le()?),
            ReadSpec::UInt16LE => Value::UInt16(self.read_u16_le()?),
            ReadSpec::Int16BE => Value::Int16(self.read_i16_be()?),
            ReadSpec::UInt16BE => Value::UInt16(self.read_u16_be()?),
            ReadSpec::Int32LE => Value::Int32(self.read_i32_le()?),
            ReadSpec::UInt32LE => Value::UInt32(self.read_u32_le()?),
            ReadSpec::Int32BE => Value::Int32(self.read_i32_be()?),
            ReadSpec::UInt32BE => Value::UInt32(self.read_u32_be()?),
            ReadSpec::FloatLE => Value::Float(self.read_f32_le()?),
            ReadSpec::FloatBE => Value::Float(self.read_f32_be()?),
            ReadSpec::DoubleLE => Value::Double(self.read_f64_le()?),
            ReadSpec::DoubleBE => Value::Double(self.read_f64_be()?),
            ReadSpec::String { encoding, length } => {
                Value::String(self.read_string(length, encoding)?)
            }
            ReadSpec::StringNT { encoding } => Value::String(self.read_string_nt(encoding)?),
            ReadSpec::Buffer { length: Some(len) } => Value::Buffer(self.read_bytes(len)?),
            ReadSpec::Buffer { length: None } => Value::Buffer(self.read_remaining()),
        })
    }

    /// Calls `step` repeatedly until no input remains, collecting the results in order.
    ///
    /// `step` receives the reader and the zero-based index of the item being decoded. It must
    /// consume at least one byte per call, otherwise this never returns.
    ///
    /// If any call fails, the cursor is restored to where it was before `read_array` was called
    /// and the error is returned.
    pub fn read_array<T, E, F>(&mut self, mut step: F) -> core::result::Result<Vec<T>, E>
    where
        F: FnMut(&mut Self, usize) -> core::result::Result<T, E>,
    {
        let start = self.position;
        let mut items = Vec::new();
        while self.position < self.data.len() {
            match step(self, items.len()) {
                Ok(item) => items.push(item),
                Err(e) => {
                    self.position = start;
                    return Err(e);
                }
            }
        }
        Ok(items)
    }

    /// Reads a slice of bytes whose length is `len`. This function returns a slice reference
    /// to the bytes; it does not copy them.
    #[inline(always)]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining_len();
        if available < len {
            return Err(ReaderError::LengthOutOfBounds {
                position: self.position,
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    /// Reads everything from the cursor to the end of the input. Never fails.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let bytes = self.remaining();
        self.position = self.data.len();
        bytes
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads a `u16` in little-endian byte order.
    #[inline(always)]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads a `u16` in big-endian byte order.
    #[inline(always)]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads an `i16` in little-endian byte order.
    #[inline(always)]
    pub fn read_i16_le(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads an `i16` in big-endian byte order.
    #[inline(always)]
    pub fn read_i16_be(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads a `u32` in little-endian byte order.
    #[inline(always)]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads a `u32` in big-endian byte order.
    #[inline(always)]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads an `i32` in little-endian byte order.
    #[inline(always)]
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads an `i32` in big-endian byte order.
    #[inline(always)]
    pub fn read_i32_be(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads an IEEE-754 `f32` in little-endian byte order.
    #[inline(always)]
    pub fn read_f32_le(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads an IEEE-754 `f32` in big-endian byte order.
    #[inline(always)]
    pub fn read_f32_be(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads an IEEE-754 `f64` in little-endian byte order.
    #[inline(always)]
    pub fn read_f64_le(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_cbytes()?))
    }

    /// Reads an IEEE-754 `f64` in big-endian byte order.
    #[inline(always)]
    pub fn read_f64_be(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads a string of `length` bytes, or of all remaining bytes if `length` is `None`.
    ///
    /// `encoding: None` selects the reader's default encoding.
    pub fn read_string(
        &mut self,
        length: Option<usize>,
        encoding: Option<Encoding>,
    ) -> Result<String> {
        let bytes = match length {
            Some(len) => self.read_bytes(len)?,
            None => self.read_remaining(),
        };
        Ok(encoding.unwrap_or(self.encoding).decode(bytes))
    }

    /// Reads the bytes up to the next `0x00`, and consumes the `0x00` as well. The returned slice
    /// does not include the terminator.
    ///
    /// Fails with `ReaderError::TerminatorNotFound` if no `0x00` occurs before the end of the
    /// input; the cursor is not moved.
    pub fn read_bytes_nt(&mut self) -> Result<&'a [u8]> {
        let rest = self.remaining();
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(ReaderError::TerminatorNotFound {
                position: self.position,
                scanned: rest.len(),
            });
        };
        self.position += len + 1;
        Ok(&rest[..len])
    }

    /// Reads a null-terminated string. The terminator is consumed but not returned.
    ///
    /// `encoding: None` selects the reader's default encoding. The terminator is always a single
    /// `0x00` byte, whatever the encoding.
    pub fn read_string_nt(&mut self, encoding: Option<Encoding>) -> Result<String> {
        let bytes = self.read_bytes_nt()?;
        Ok(encoding.unwrap_or(self.encoding).decode(bytes))
    }

    /// Reads a null-terminated string without decoding it, and returns it as a `bstr::BStr`.
    ///
    /// The caller must handle validating that the string is well-formed UTF-8, if necessary.
    #[cfg(feature = "bstr")]
    pub fn read_bstr_nt(&mut self) -> Result<&'a bstr::BStr> {
        Ok(bstr::BStr::new(self.read_bytes_nt()?))
    }
}

/// Error type for `BufferReader`
///
/// Every error leaves the reader's cursor exactly where it was before the failed call.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ReaderError {
    /// A read needs more bytes than remain between the cursor and the end of the input.
    #[error(
        "length out of bounds: {needed} bytes requested at position {position}, {available} available"
    )]
    LengthOutOfBounds {
        /// Cursor position when the read was attempted.
        position: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes between the cursor and the end of the input.
        available: usize,
    },

    /// A null-terminated read reached the end of the input without finding a `0x00` byte.
    #[error("length out of bounds (null-terminator not found): scanned {scanned} bytes from position {position}")]
    TerminatorNotFound {
        /// Cursor position when the read was attempted.
        position: usize,
        /// Number of bytes scanned.
        scanned: usize,
    },

    /// An `offset` or `offset_absolute` target falls outside `[0, len]`.
    #[error("offset out of bounds: delta {delta} (absolute: {absolute}) from position {position} is outside [0, {len}]")]
    OffsetOutOfBounds {
        /// Cursor position when the move was attempted.
        position: usize,
        /// The requested delta.
        delta: isize,
        /// Whether the move was absolute.
        absolute: bool,
        /// Length of the input.
        len: usize,
    },
}

impl ReaderError {
    /// Returns `true` for `LengthOutOfBounds` and its specialization, `TerminatorNotFound`.
    pub fn is_length_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Self::LengthOutOfBounds { .. } | Self::TerminatorNotFound { .. }
        )
    }
}
