//! Text encodings for the `String` and `StringNT` kinds.
//!
//! The default encoding is UTF-8. Readers and writers fall back to their own configured default
//! (see `BufferReader::with_encoding` and `BufferWriter::with_encoding`) whenever a spec leaves
//! its `encoding` unset.
//!
//! Encoding text into bytes never fails. Encodings that cannot represent every `char` (Latin-1,
//! ASCII) keep only the low byte of each UTF-16 code unit, and the `Hex`, `Base64` and
//! `Base64Url` encodings stop at, or skip over, input they cannot parse. Decoding never fails
//! either; malformed input is replaced with U+FFFD where the encoding has a notion of
//! "malformed".

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use base64::alphabet;
use base64::engine::general_purpose::{
    GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD,
};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use strum::{Display, EnumIter, EnumString};
use zerocopy::byteorder::{LE, U16};
use zerocopy::FromBytes;

/// The text encoding used to convert between `str` and bytes.
///
/// Names parse case-insensitively with the usual aliases:
///
/// ```
/// use cursor_buffer::Encoding;
/// assert_eq!("UTF-8".parse::<Encoding>(), Ok(Encoding::Utf8));
/// assert_eq!("ucs2".parse::<Encoding>(), Ok(Encoding::Utf16Le));
/// assert_eq!("binary".parse::<Encoding>(), Ok(Encoding::Latin1));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Encoding {
    /// UTF-8. Decoding is lossy.
    #[default]
    #[strum(to_string = "utf8", serialize = "utf-8")]
    Utf8,

    /// UTF-16, little-endian code units. An odd trailing byte is ignored when decoding.
    ///
    /// Not suitable for `StringNT`: the terminator is a single `0x00` byte, and the high byte of
    /// any code unit below U+0100 is also `0x00`, so a null-terminated read stops inside the
    /// first such character.
    #[strum(
        to_string = "utf16le",
        serialize = "utf-16le",
        serialize = "ucs2",
        serialize = "ucs-2"
    )]
    Utf16Le,

    /// ISO-8859-1. Each byte is one code point in U+0000..=U+00FF.
    #[strum(to_string = "latin1", serialize = "binary")]
    Latin1,

    /// 7-bit ASCII. Encodes like `Latin1`; decoding clears the high bit of every byte.
    #[strum(to_string = "ascii")]
    Ascii,

    /// Pairs of hexadecimal digits. Decoding renders lowercase digits.
    #[strum(to_string = "hex")]
    Hex,

    /// Base64. Encoding accepts the standard and URL-safe alphabets with or without padding;
    /// decoding renders the padded standard alphabet.
    #[strum(to_string = "base64")]
    Base64,

    /// URL-safe base64. Encoding accepts the same input as `Base64`; decoding renders the
    /// URL-safe alphabet without padding.
    #[strum(to_string = "base64url")]
    Base64Url,
}

const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

impl Encoding {
    /// Converts `text` to bytes. UTF-8 borrows the input; every other encoding allocates.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(text.as_bytes()),
            Self::Utf16Le => Cow::Owned(
                text.encode_utf16()
                    .flat_map(u16::to_le_bytes)
                    .collect(),
            ),
            Self::Latin1 | Self::Ascii => {
                Cow::Owned(text.encode_utf16().map(|unit| unit as u8).collect())
            }
            Self::Hex => Cow::Owned(hex_digits_to_bytes(text)),
            Self::Base64 | Self::Base64Url => Cow::Owned(base64_digits_to_bytes(text)),
        }
    }

    /// Converts `bytes` to text.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16Le => decode_utf16le(bytes),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Ascii => bytes.iter().map(|&b| char::from(b & 0x7f)).collect(),
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
            Self::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        }
    }
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let even = &bytes[..bytes.len() & !1];
    let Ok(units) = <[U16<LE>]>::ref_from_bytes(even) else {
        return String::new();
    };
    char::decode_utf16(units.iter().map(|unit| unit.get()))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Parses digit pairs until the first pair that is not valid hex.
fn hex_digits_to_bytes(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() / 2);
    for pair in text.as_bytes().chunks_exact(2) {
        let mut byte = [0u8; 1];
        if hex::decode_to_slice(pair, &mut byte).is_err() {
            break;
        }
        out.push(byte[0]);
    }
    out
}

/// Decodes everything up to the first `=`, skipping characters outside both alphabets.
fn base64_digits_to_bytes(text: &str) -> Vec<u8> {
    let mut digits: Vec<u8> = text
        .bytes()
        .take_while(|&b| b != b'=')
        .filter_map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => Some(b),
            b'-' => Some(b'+'),
            b'_' => Some(b'/'),
            _ => None,
        })
        .collect();

    // A single leftover digit carries fewer than 8 bits.
    if digits.len() % 4 == 1 {
        digits.pop();
    }

    BASE64_LENIENT.decode(&digits).unwrap_or_default()
}
