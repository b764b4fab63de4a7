//! Byte stream conversion into UTF-8
//!
//! Every source byte maps to exactly one code point, so conversion carries no
//! state between bytes and input can be split anywhere.

use std::io::{self, BufRead, BufReader, Read, Write};

use log::debug;
use serde::Serialize;

use crate::tables;
use crate::utf8::{self, Utf8Seq};
use crate::{Encoding, Error, Result};

/// Default read buffer for stream conversion (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Summary of a finished stream conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Source encoding
    pub encoding: Encoding,
    /// Bytes consumed from the input
    pub bytes_read: u64,
    /// UTF-8 bytes written to the output
    pub bytes_written: u64,
}

/// Converter bound to one source encoding
///
/// Holds only a reference to a static table, so it is `Copy` and can be
/// shared freely across threads converting independent streams.
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    encoding: Encoding,
    table: &'static tables::CodePage,
    buffer_size: usize,
}

impl Converter {
    /// Create a converter for `encoding`
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            table: tables::code_page(encoding),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Resolve an encoding selector and create a converter for it
    pub fn from_name(name: &str) -> Result<Self> {
        let encoding = Encoding::from_name(name)?;
        debug!("resolved encoding {}", encoding.name());
        Ok(Self::new(encoding))
    }

    /// Use a custom read buffer size for [`Converter::convert_stream`]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Get source encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Code point for one source byte
    #[inline]
    pub fn decode(&self, byte: u8) -> u16 {
        if byte < 0x80 {
            u16::from(byte)
        } else {
            self.table[(byte - 0x80) as usize]
        }
    }

    /// Character for one source byte
    pub fn decode_char(&self, byte: u8) -> char {
        char::from_u32(u32::from(self.decode(byte))).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// UTF-8 bytes for one source byte
    #[inline]
    pub fn encode_byte(&self, byte: u8) -> Utf8Seq {
        utf8::encode(self.decode(byte))
    }

    /// Convert an in-memory buffer
    ///
    /// Never fails: every byte value has a mapping.
    pub fn convert(&self, input: &[u8]) -> Vec<u8> {
        let mut output = Vec::with_capacity(input.len() * 2);
        self.convert_into(input, &mut output);
        output
    }

    /// Convert an in-memory buffer into a `String`
    pub fn convert_to_string(&self, input: &[u8]) -> String {
        input.iter().map(|&byte| self.decode_char(byte)).collect()
    }

    /// Lazily convert a byte iterator
    ///
    /// The returned iterator is single-pass, like the input it wraps.
    pub fn bytes<I>(&self, input: I) -> Utf8Bytes<I::IntoIter>
    where
        I: IntoIterator<Item = u8>,
    {
        Utf8Bytes {
            converter: *self,
            input: input.into_iter(),
            pending: None,
            pos: 0,
        }
    }

    fn convert_into(&self, input: &[u8], output: &mut Vec<u8>) {
        for &byte in input {
            if byte < 0x80 {
                output.push(byte);
            } else {
                output.extend_from_slice(&self.encode_byte(byte));
            }
        }
    }

    /// Convert everything from `reader` into `writer`
    ///
    /// Fails with [`Error::EmptyInput`] before anything is written when the
    /// reader yields no bytes at all. Output is flushed before returning.
    pub fn convert_stream<R: Read, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> Result<ConversionStats> {
        let mut reader = BufReader::with_capacity(self.buffer_size, reader);
        let mut output = Vec::with_capacity(self.buffer_size * 2);
        let mut stats = ConversionStats {
            encoding: self.encoding,
            bytes_read: 0,
            bytes_written: 0,
        };

        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::InputUnavailable(e)),
            };
            if chunk.is_empty() {
                break;
            }

            output.clear();
            self.convert_into(chunk, &mut output);
            let consumed = chunk.len();
            reader.consume(consumed);

            writer.write_all(&output).map_err(Error::OutputUnavailable)?;
            stats.bytes_read += consumed as u64;
            stats.bytes_written += output.len() as u64;
        }

        if stats.bytes_read == 0 {
            return Err(Error::EmptyInput);
        }
        writer.flush().map_err(Error::OutputUnavailable)?;

        debug!(
            "converted {} bytes of {} into {} UTF-8 bytes",
            stats.bytes_read,
            self.encoding.name(),
            stats.bytes_written
        );
        Ok(stats)
    }
}

/// Convert `input` from the encoding named `encoding_name` into `output`
///
/// The name is resolved before `input` is touched, so an unsupported
/// encoding never consumes input or produces output.
pub fn convert<R: Read, W: Write>(
    input: R,
    encoding_name: &str,
    output: W,
) -> Result<ConversionStats> {
    Converter::from_name(encoding_name)?.convert_stream(input, output)
}

/// Lazy UTF-8 byte iterator returned by [`Converter::bytes`]
#[derive(Debug, Clone)]
pub struct Utf8Bytes<I> {
    converter: Converter,
    input: I,
    pending: Option<Utf8Seq>,
    pos: usize,
}

impl<I: Iterator<Item = u8>> Iterator for Utf8Bytes<I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        loop {
            if let Some(seq) = self.pending {
                if let Some(&byte) = seq.as_bytes().get(self.pos) {
                    self.pos += 1;
                    return Some(byte);
                }
                self.pending = None;
            }

            let byte = self.input.next()?;
            if byte < 0x80 {
                return Some(byte);
            }
            self.pending = Some(self.converter.encode_byte(byte));
            self.pos = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self
            .pending
            .map_or(0, |seq| seq.len().saturating_sub(self.pos));
        let (lo, hi) = self.input.size_hint();
        (
            lo.saturating_add(left),
            hi.and_then(|hi| hi.checked_mul(3)?.checked_add(left)),
        )
    }
}
