//! Hexadecimal encoding and decoding, plus serde helpers for hex string
//! fields.

use std::fmt::Write as _;

use thiserror::Error;

/// Letter case for encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    Lower,
    Upper,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A two-character group that is not valid hexadecimal, with the zero-based
    /// offset of the byte it was supposed to encode.
    #[error("unexpected byte {0:?} at offset {1}")]
    UnexpectedByte(String, usize),
}

/// Encodes `bytes` as a hexadecimal string, two characters per byte.
pub fn encode(bytes: &[u8], case: Case) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = match case {
            Case::Lower => write!(out, "{byte:02x}"),
            Case::Upper => write!(out, "{byte:02X}"),
        };
    }
    out
}

/// Decodes a hexadecimal string into bytes.
///
/// Each byte must be written as exactly two characters: a byte with value 1 is
/// `01`, never `1`. A trailing unpaired character is ignored. Upper and lower
/// case are both accepted.
pub fn decode(hex: &str) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for (offset, pair) in hex.as_bytes().chunks_exact(2).enumerate() {
        let byte = std::str::from_utf8(pair)
            .ok()
            .and_then(|text| u8::from_str_radix(text, 16).ok())
            .ok_or_else(|| {
                DecodeError::UnexpectedByte(String::from_utf8_lossy(pair).into_owned(), offset)
            })?;
        bytes.push(byte);
    }
    Ok(bytes)
}

/// Serde helpers for byte fields carried as hex strings:
///
/// ```rust
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Frame {
///     #[serde(with = "kitbag::hex::serde")]
///     payload: Vec<u8>,
/// }
/// ```
pub mod serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(bytes, super::Case::Lower))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::decode(&text).map_err(D::Error::custom)
    }
}
