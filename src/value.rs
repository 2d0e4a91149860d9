//! The vocabulary shared by `BufferReader` and `BufferWriter`: which kinds of values exist, how
//! wide they are on the wire, and what a decoded value looks like.
//!
//! | Kind | Width | Notes |
//! |---|---|---|
//! | `Int8`, `UInt8` | 1 | |
//! | `Int16LE`, `UInt16LE`, `Int16BE`, `UInt16BE` | 2 | |
//! | `Int32LE`, `UInt32LE`, `Int32BE`, `UInt32BE` | 4 | |
//! | `FloatLE`, `FloatBE` | 4 | IEEE-754 single precision |
//! | `DoubleLE`, `DoubleBE` | 8 | IEEE-754 double precision |
//! | `String` | variable | explicit length, or the rest of the buffer |
//! | `StringNT` | variable | terminated by a single `0x00` byte |
//! | `Buffer` | variable | raw bytes; explicit length, or the rest of the buffer |

use alloc::string::String;

use strum::{Display, EnumIter};

use crate::Encoding;

/// The wire kind of a value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumIter)]
pub enum Kind {
    /// `i8`
    Int8,
    /// `u8`
    UInt8,
    /// `i16`, little-endian
    Int16LE,
    /// `u16`, little-endian
    UInt16LE,
    /// `i16`, big-endian
    Int16BE,
    /// `u16`, big-endian
    UInt16BE,
    /// `i32`, little-endian
    Int32LE,
    /// `u32`, little-endian
    UInt32LE,
    /// `i32`, big-endian
    Int32BE,
    /// `u32`, big-endian
    UInt32BE,
    /// `f32`, little-endian
    FloatLE,
    /// `f32`, big-endian
    FloatBE,
    /// `f64`, little-endian
    DoubleLE,
    /// `f64`, big-endian
    DoubleBE,
    /// Text without a terminator.
    String,
    /// Text followed by a `0x00` byte.
    StringNT,
    /// Raw bytes, copied verbatim.
    Buffer,
}

impl Kind {
    /// Returns the encoded width in bytes, or `None` if the width depends on the value.
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16LE | Self::UInt16LE | Self::Int16BE | Self::UInt16BE => Some(2),
            Self::Int32LE | Self::UInt32LE | Self::Int32BE | Self::UInt32BE => Some(4),
            Self::FloatLE | Self::FloatBE => Some(4),
            Self::DoubleLE | Self::DoubleBE => Some(8),
            Self::String | Self::StringNT | Self::Buffer => None,
        }
    }
}

/// Describes a value to be read: its kind, plus any decode parameters.
///
/// `encoding: None` means "use the reader's default encoding" (UTF-8 unless configured
/// otherwise). `length: None` means "everything from the cursor to the end of the buffer".
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[allow(missing_docs)] // variants mirror `Kind`
pub enum ReadSpec {
    Int8,
    UInt8,
    Int16LE,
    UInt16LE,
    Int16BE,
    UInt16BE,
    Int32LE,
    UInt32LE,
    Int32BE,
    UInt32BE,
    FloatLE,
    FloatBE,
    DoubleLE,
    DoubleBE,
    String {
        encoding: Option<Encoding>,
        length: Option<usize>,
    },
    StringNT {
        encoding: Option<Encoding>,
    },
    Buffer {
        length: Option<usize>,
    },
}

impl ReadSpec {
    /// A `String` that runs to the end of the buffer, in the reader's default encoding.
    pub const fn string() -> Self {
        Self::String {
            encoding: None,
            length: None,
        }
    }

    /// A `String` of exactly `length` bytes, in the reader's default encoding.
    pub const fn string_len(length: usize) -> Self {
        Self::String {
            encoding: None,
            length: Some(length),
        }
    }

    /// A null-terminated string in the reader's default encoding.
    pub const fn string_nt() -> Self {
        Self::StringNT { encoding: None }
    }

    /// Exactly `length` raw bytes.
    pub const fn buffer_len(length: usize) -> Self {
        Self::Buffer {
            length: Some(length),
        }
    }

    /// The kind of value this spec reads.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Int8 => Kind::Int8,
            Self::UInt8 => Kind::UInt8,
            Self::Int16LE => Kind::Int16LE,
            Self::UInt16LE => Kind::UInt16LE,
            Self::Int16BE => Kind::Int16BE,
            Self::UInt16BE => Kind::UInt16BE,
            Self::Int32LE => Kind::Int32LE,
            Self::UInt32LE => Kind::UInt32LE,
            Self::Int32BE => Kind::Int32BE,
            Self::UInt32BE => Kind::UInt32BE,
            Self::FloatLE => Kind::FloatLE,
            Self::FloatBE => Kind::FloatBE,
            Self::DoubleLE => Kind::DoubleLE,
            Self::DoubleBE => Kind::DoubleBE,
            Self::String { .. } => Kind::String,
            Self::StringNT { .. } => Kind::StringNT,
            Self::Buffer { .. } => Kind::Buffer,
        }
    }
}

/// Describes a value to be written: its kind and the value itself.
///
/// There is no `length` parameter; a string or byte run is always written in full. For
/// `StringNT`, a single `0x00` byte follows the encoded text.
#[derive(Copy, Clone, PartialEq, Debug)]
#[allow(missing_docs)] // variants mirror `Kind`
pub enum WriteSpec<'v> {
    Int8(i8),
    UInt8(u8),
    Int16LE(i16),
    UInt16LE(u16),
    Int16BE(i16),
    UInt16BE(u16),
    Int32LE(i32),
    UInt32LE(u32),
    Int32BE(i32),
    UInt32BE(u32),
    FloatLE(f32),
    FloatBE(f32),
    DoubleLE(f64),
    DoubleBE(f64),
    String {
        value: &'v str,
        encoding: Option<Encoding>,
    },
    /// Encoded text followed by one `0x00` byte, whatever the encoding. With a multi-byte
    /// encoding such as `Utf16Le`, the text usually contains `0x00` bytes of its own and does not
    /// read back intact as a `StringNT`.
    StringNT {
        value: &'v str,
        encoding: Option<Encoding>,
    },
    Buffer(&'v [u8]),
}

impl<'v> WriteSpec<'v> {
    /// A `String` in the writer's default encoding.
    pub const fn string(value: &'v str) -> Self {
        Self::String {
            value,
            encoding: None,
        }
    }

    /// A null-terminated string in the writer's default encoding.
    pub const fn string_nt(value: &'v str) -> Self {
        Self::StringNT {
            value,
            encoding: None,
        }
    }

    /// The kind of value this spec writes.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Int8(_) => Kind::Int8,
            Self::UInt8(_) => Kind::UInt8,
            Self::Int16LE(_) => Kind::Int16LE,
            Self::UInt16LE(_) => Kind::UInt16LE,
            Self::Int16BE(_) => Kind::Int16BE,
            Self::UInt16BE(_) => Kind::UInt16BE,
            Self::Int32LE(_) => Kind::Int32LE,
            Self::UInt32LE(_) => Kind::UInt32LE,
            Self::Int32BE(_) => Kind::Int32BE,
            Self::UInt32BE(_) => Kind::UInt32BE,
            Self::FloatLE(_) => Kind::FloatLE,
            Self::FloatBE(_) => Kind::FloatBE,
            Self::DoubleLE(_) => Kind::DoubleLE,
            Self::DoubleBE(_) => Kind::DoubleBE,
            Self::String { .. } => Kind::String,
            Self::StringNT { .. } => Kind::StringNT,
            Self::Buffer(_) => Kind::Buffer,
        }
    }
}

/// A value decoded by `BufferReader::read`.
///
/// Raw byte runs borrow from the reader's input; strings are decoded into an owned `String`.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)] // variants mirror `Kind`
pub enum Value<'a> {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float(f32),
    Double(f64),
    String(String),
    Buffer(&'a [u8]),
}

impl<'a> Value<'a> {
    /// Returns the value widened to `i64`, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int8(v) => Some(v.into()),
            Self::UInt8(v) => Some(v.into()),
            Self::Int16(v) => Some(v.into()),
            Self::UInt16(v) => Some(v.into()),
            Self::Int32(v) => Some(v.into()),
            Self::UInt32(v) => Some(v.into()),
            _ => None,
        }
    }

    /// Returns the value widened to `f64`, if it is a floating-point number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v.into()),
            Self::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the text, if this is a decoded string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the raw bytes, if this is a byte run.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Self::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Consumes the value and returns its text, if it is a decoded string.
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}
