//! Text encodings for string fields

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StructError};

/// Character encoding of a string field.
///
/// String lengths are always byte lengths of the encoded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    #[serde(alias = "utf-16le", alias = "ucs2", alias = "ucs-2")]
    Utf16Le,
    /// One byte per code point, U+0000..=U+00FF
    #[serde(alias = "binary")]
    Latin1,
    /// 7-bit ASCII
    Ascii,
    /// Each byte as two lowercase hex digits
    Hex,
}

impl Encoding {
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
        }
    }

    /// Decode `bytes` to text. With `lossy`, undecodable input becomes
    /// replacement characters (or, for ASCII, drops the high bit) instead
    /// of failing.
    pub fn decode(self, bytes: &[u8], lossy: bool) -> Result<String> {
        match self {
            Encoding::Utf8 if lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| self.invalid(e)),
            Encoding::Utf16Le => {
                if bytes.len() % 2 != 0 && !lossy {
                    return Err(self.invalid("odd number of bytes"));
                }
                let units: Vec<u16> = bytes.chunks_exact(2).map(LittleEndian::read_u16).collect();
                if lossy {
                    Ok(String::from_utf16_lossy(&units))
                } else {
                    String::from_utf16(&units).map_err(|e| self.invalid(e))
                }
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Ascii => {
                if !lossy && !bytes.is_ascii() {
                    return Err(self.invalid("byte outside 0x00..=0x7F"));
                }
                Ok(bytes.iter().map(|&b| char::from(b & 0x7F)).collect())
            }
            Encoding::Hex => Ok(hex::encode(bytes)),
        }
    }

    /// Encode `text` to bytes.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| self.invalid(format!("{c:?} not representable"))))
                .collect(),
            Encoding::Ascii => {
                if !text.is_ascii() {
                    return Err(self.invalid("text is not ASCII"));
                }
                Ok(text.as_bytes().to_vec())
            }
            Encoding::Hex => hex::decode(text).map_err(|e| self.invalid(e)),
        }
    }

    fn invalid(self, reason: impl std::fmt::Display) -> StructError {
        StructError::InvalidText {
            encoding: self.name(),
            reason: reason.to_string(),
        }
    }
}
