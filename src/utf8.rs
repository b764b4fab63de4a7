//! UTF-8 encoding of 16-bit code points
//!
//! Code page tables only hold Basic Multilingual Plane values, so every code
//! point fits in at most three UTF-8 bytes. Four-byte sequences are out of
//! scope: widening the domain past `u16` needs a new encoder, not a tweak here.

use std::ops::Deref;

/// Encoded form of a single code point (1-3 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Seq {
    buf: [u8; 3],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl Utf8Seq {
    /// The encoded bytes, lead byte first
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of encoded bytes (1, 2 or 3)
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }
}

impl Deref for Utf8Seq {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Number of bytes [`encode`] produces for `code_point`.
#[inline]
pub fn encoded_len(code_point: u16) -> usize {
    match code_point {
        0..0x80 => 1,
        0x80..0x800 => 2,
        _ => 3,
    }
}

/// Encode one code point as UTF-8.
///
/// Total over `u16`; surrogate values are not expected from the tables and
/// are written with the generic three-byte layout.
#[inline]
pub fn encode(code_point: u16) -> Utf8Seq {
    let cp = code_point;
    match cp {
        0..0x80 => Utf8Seq {
            buf: [cp as u8, 0, 0],
            len: 1,
        },
        0x80..0x800 => Utf8Seq {
            buf: [0xC0 | (cp >> 6) as u8, 0x80 | (cp & 0x3F) as u8, 0],
            len: 2,
        },
        _ => Utf8Seq {
            buf: [
                0xE0 | (cp >> 12) as u8,
                0x80 | ((cp >> 6) & 0x3F) as u8,
                0x80 | (cp & 0x3F) as u8,
            ],
            len: 3,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_single_byte() {
        assert_eq!(encode(0x41).as_bytes(), b"A");
        assert_eq!(encode(0x00).as_bytes(), &[0x00]);
        assert_eq!(encode(0x7F).as_bytes(), &[0x7F]);
    }

    #[test]
    fn test_two_byte_boundaries() {
        assert_eq!(encode(0x80).as_bytes(), &[0xC2, 0x80]);
        assert_eq!(encode(0x0410).as_bytes(), &[0xD0, 0x90]); // А
        assert_eq!(encode(0x07FF).as_bytes(), &[0xDF, 0xBF]);
    }

    #[test]
    fn test_three_byte_boundaries() {
        assert_eq!(encode(0x0800).as_bytes(), &[0xE0, 0xA0, 0x80]);
        assert_eq!(encode(0x20AC).as_bytes(), &[0xE2, 0x82, 0xAC]); // €
        assert_eq!(encode(0xFFFD).as_bytes(), &[0xEF, 0xBF, 0xBD]);
        assert_eq!(encode(0xFFFF).as_bytes(), &[0xEF, 0xBF, 0xBF]);
    }

    #[test]
    fn test_matches_std_for_every_scalar_value() {
        let mut buf = [0u8; 4];
        for cp in (0..=0xFFFFu16).filter(|cp| !(0xD800..=0xDFFF).contains(cp)) {
            let ch = char::from_u32(u32::from(cp)).unwrap();
            let seq = encode(cp);
            assert_eq!(&*seq, ch.encode_utf8(&mut buf).as_bytes(), "U+{cp:04X}");
            assert_eq!(seq.len(), encoded_len(cp));
        }
    }
}
