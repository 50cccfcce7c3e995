//! Byte transcoding
//!
//! Base64 (RFC 4648 standard alphabet, canonical padding) and the
//! Latin-1 <-> UTF-8 mapping used by `Buffer.toString('binary')`.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Transcoding failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TranscodeError {
    /// Not valid standard base64
    InvalidEncoding,
    /// UTF-8 outside the U+0000..U+00FF subset
    NotLatin1,
}

/// Scratch capacity needed to decode `len` base64 characters
pub const fn base64_scratch_len(len: usize) -> usize {
    (len / 4) * 3 + 3
}

/// Decode standard base64
pub fn decode_base64(input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let mut out = vec![0u8; base64_scratch_len(input.len())];
    let written = STANDARD
        .decode_slice(input, &mut out)
        .map_err(|_| TranscodeError::InvalidEncoding)?;
    out.truncate(written);
    Ok(out)
}

/// Encode as standard base64 with padding
pub fn encode_base64(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Map each byte to the code point of the same value
pub fn encode_latin1_to_utf8(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    for &b in input {
        out.push(char::from(b));
    }
    out
}

/// Inverse of [`encode_latin1_to_utf8`]
///
/// Accepts ASCII and the two-byte sequences `C2 80..BF` / `C3 80..BF`.
/// Nothing is returned unless the whole input is in that subset.
pub fn decode_utf8_latin1_subset(input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.iter().copied();
    while let Some(b) = bytes.next() {
        match b {
            0x00..=0x7F => out.push(b),
            0xC2 | 0xC3 => match bytes.next() {
                Some(cont @ 0x80..=0xBF) => out.push(((b & 0x03) << 6) | (cont & 0x3F)),
                _ => return Err(TranscodeError::NotLatin1),
            },
            _ => return Err(TranscodeError::NotLatin1),
        }
    }
    Ok(out)
}
