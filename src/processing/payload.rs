//! # Payload and Bitstream
//!
//! A [`Payload`] is the byte form of the hidden text: one byte per character,
//! restricted to code points 0-255. On the wire it is followed by the two-byte
//! [`END_MARKER`] and expanded most-significant bit first.

use super::error::StegoError;

/// Terminates every embedded payload: `11111111 11111110`.
pub const END_MARKER: [u8; 2] = [0xFF, 0xFE];

/// Number of bits the end marker occupies in the bitstream.
pub const END_MARKER_BITS: usize = END_MARKER.len() * 8;

/// Text converted to single-byte character codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Convert text to a payload, one byte per character.
    ///
    /// # Errors
    /// - [`StegoError::PayloadEncoding`] for any character above U+00FF
    /// - [`StegoError::MarkerCollision`] if the text contains U+00FF followed by U+00FE
    pub fn from_text(text: &str) -> Result<Self, StegoError> {
        let bytes = text
            .chars()
            .enumerate()
            .map(|(position, character)| {
                u8::try_from(u32::from(character))
                    .map_err(|_| StegoError::PayloadEncoding { character, position })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::from_bytes(bytes)
    }

    /// Wrap raw bytes as a payload.
    ///
    /// # Errors
    /// - [`StegoError::MarkerCollision`] if the bytes contain `0xFF 0xFE`
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, StegoError> {
        if let Some(position) = bytes.windows(2).position(|pair| pair == END_MARKER) {
            return Err(StegoError::MarkerCollision { position });
        }
        Ok(Self(bytes))
    }

    /// Wrap bytes recovered by the decoder, which never contain the marker.
    pub(crate) fn from_decoded(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Map every byte back to the character with the same code point.
    pub fn to_text(&self) -> String {
        self.0.iter().map(|&byte| char::from(byte)).collect()
    }

    /// Length of the embedded bitstream: payload bits plus the end marker.
    pub fn bitstream_len(&self) -> usize {
        self.0.len() * 8 + END_MARKER_BITS
    }

    /// Payload bytes followed by the end marker, each expanded MSB first.
    pub fn bitstream(&self) -> impl Iterator<Item = u8> + '_ {
        self.0
            .iter()
            .chain(END_MARKER.iter())
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
    }
}
