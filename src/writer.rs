use alloc::vec::Vec;

use tracing::trace;

use crate::{resolve_offset, Encoding, WriteSpec};

/// Encodes typed values into a growable buffer, at a cursor that the caller can move.
///
/// Writing never fails. Each `write_*` method encodes one value and copies it into the buffer at
/// the cursor, overwriting whatever was there; if the value runs past the end of the buffer, the
/// buffer grows to fit. The cursor then advances by the encoded length.
///
/// Moving the cursor never fails either. A target past the end of the buffer appends zero bytes
/// up to the target; a target before the start prepends zero bytes and leaves the cursor at 0,
/// shifting all existing content to the right.
///
/// ```
/// use cursor_buffer::{BufferWriter, WriteSpec};
///
/// let mut w = BufferWriter::new();
/// w.offset(2).write(WriteSpec::UInt16BE(0x0102));
/// assert_eq!(w.as_bytes(), [0, 0, 1, 2]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BufferWriter {
    out: Vec<u8>,
    position: usize,
    encoding: Encoding,
}

impl BufferWriter {
    /// Creates an empty `BufferWriter`. Strings default to UTF-8.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `BufferWriter` with the given capacity.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            out: Vec::with_capacity(len),
            ..Self::default()
        }
    }

    /// Sets the encoding used by string writes that do not name one.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The encoding used by string writes that do not name one.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns a copy of everything written so far, including zero padding.
    pub fn buffer(&self) -> Vec<u8> {
        self.out.clone()
    }

    /// Accesses the inner buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.out
    }

    /// Length of the buffer. This is the furthest the cursor has ever reached, not the end of the
    /// most recent write.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Returns `true` if nothing has been written and the cursor has never moved forward.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// The cursor, in bytes from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor by `delta` bytes relative to its current position, padding the buffer
    /// with zeros at either end if the target lies outside it.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would have to grow beyond `isize::MAX` bytes.
    pub fn offset(&mut self, delta: isize) -> &mut Self {
        self.seek(delta, false)
    }

    /// Moves the cursor to an absolute position, padding the buffer with zeros at either end if
    /// the target lies outside it. A non-negative `delta` counts from the start of the buffer; a
    /// negative `delta` counts back from the end.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would have to grow beyond `isize::MAX` bytes.
    pub fn offset_absolute(&mut self, delta: isize) -> &mut Self {
        self.seek(delta, true)
    }

    fn seek(&mut self, delta: isize, absolute: bool) -> &mut Self {
        let len = self.out.len();
        let target = resolve_offset(self.position, len, delta, absolute);
        let distance = target.unsigned_abs();

        if target < 0 {
            trace!(pad = distance, len, "prepending zero padding");
            self.out.resize(len + distance, 0);
            self.out.copy_within(..len, distance);
            self.out[..distance].fill(0);
            self.position = 0;
        } else {
            if distance > len {
                trace!(pad = distance - len, len, "appending zero padding");
                self.out.resize(distance, 0);
            }
            self.position = distance;
        }
        self
    }

    /// Encodes one value described by `spec`.
    pub fn write(&mut self, spec: WriteSpec<'_>) -> &mut Self {
        match spec {
            WriteSpec::Int8(v) => self.write_i8(v),
            WriteSpec::UInt8(v) => self.write_u8(v),
            WriteSpec::Int16LE(v) => self.write_i16_le(v),
            WriteSpec::UInt16LE(v) => self.write_u16_le(v),
            WriteSpec::Int16BE(v) => self.write_i16_be(v),
            WriteSpec::UInt16BE(v) => self.write_u16_be(v),
            WriteSpec::Int32LE(v) => self.write_i32_le(v),
            WriteSpec::UInt32LE(v) => self.write_u32_le(v),
            WriteSpec::Int32BE(v) => self.write_i32_be(v),
            WriteSpec::UInt32BE(v) => self.write_u32_be(v),
            WriteSpec::FloatLE(v) => self.write_f32_le(v),
            WriteSpec::FloatBE(v) => self.write_f32_be(v),
            WriteSpec::DoubleLE(v) => self.write_f64_le(v),
            WriteSpec::DoubleBE(v) => self.write_f64_be(v),
            WriteSpec::String { value, encoding } => self.write_string(value, encoding),
            WriteSpec::StringNT { value, encoding } => self.write_string_nt(value, encoding),
            WriteSpec::Buffer(bytes) => self.write_bytes(bytes),
        }
    }

    /// Calls `step` once per item, in order. `step` receives the writer, the item and its
    /// zero-based index.
    pub fn write_array<I, F>(&mut self, items: I, mut step: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item, usize),
    {
        for (index, item) in items.into_iter().enumerate() {
            step(self, item, index);
        }
        self
    }

    /// Writes `bytes` at the cursor, overwriting existing bytes and growing the buffer as needed.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        let overlap = bytes.len().min(self.out.len() - self.position);
        let (head, tail) = bytes.split_at(overlap);
        self.out[self.position..self.position + overlap].copy_from_slice(head);
        self.out.extend_from_slice(tail);
        self.position += bytes.len();
        self
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> &mut Self {
        self.write_bytes(&value)
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.write_cbytes([value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes a `u16` in little-endian byte order
    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes a `u16` in big-endian byte order
    pub fn write_u16_be(&mut self, value: u16) -> &mut Self {
        self.write_cbytes(value.to_be_bytes())
    }

    /// Writes an `i16` in little-endian byte order
    pub fn write_i16_le(&mut self, value: i16) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes an `i16` in big-endian byte order
    pub fn write_i16_be(&mut self, value: i16) -> &mut Self {
        self.write_cbytes(value.to_be_bytes())
    }

    /// Writes a `u32` in little-endian byte order
    pub fn write_u32_le(&mut self, value: u32) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes a `u32` in big-endian byte order
    pub fn write_u32_be(&mut self, value: u32) -> &mut Self {
        self.write_cbytes(value.to_be_bytes())
    }

    /// Writes an `i32` in little-endian byte order
    pub fn write_i32_le(&mut self, value: i32) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes an `i32` in big-endian byte order
    pub fn write_i32_be(&mut self, value: i32) -> &mut Self {
        self.write_cbytes(value.to_be_bytes())
    }

    /// Writes an `f32` value using its 4-byte little-endian IEEE-754 representation.
    pub fn write_f32_le(&mut self, value: f32) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes an `f32` value using its 4-byte big-endian IEEE-754 representation.
    pub fn write_f32_be(&mut self, value: f32) -> &mut Self {
        self.write_cbytes(value.to_be_bytes())
    }

    /// Writes an `f64` value using its 8-byte little-endian IEEE-754 representation.
    pub fn write_f64_le(&mut self, value: f64) -> &mut Self {
        self.write_cbytes(value.to_le_bytes())
    }

    /// Writes an `f64` value using its 8-byte big-endian IEEE-754 representation.
    pub fn write_f64_be(&mut self, value: f64) -> &mut Self {
        self.write_cbytes(value.to_be_bytes())
    }

    /// Writes the encoded bytes of `value`, with no length prefix and no terminator.
    ///
    /// `encoding: None` selects the writer's default encoding.
    pub fn write_string(&mut self, value: &str, encoding: Option<Encoding>) -> &mut Self {
        let bytes = encoding.unwrap_or(self.encoding).encode(value);
        self.write_bytes(&bytes)
    }

    /// Writes the encoded bytes of `value` followed by a single `0x00` byte.
    ///
    /// This function does not check that `value` is free of interior NULs; a string that contains
    /// one will read back truncated.
    pub fn write_string_nt(&mut self, value: &str, encoding: Option<Encoding>) -> &mut Self {
        self.write_string(value, encoding).write_u8(0)
    }
}
