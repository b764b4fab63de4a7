//! # cyrconv - Cyrillic Code Page to UTF-8 Converter
//!
//! Converts text stored in one of the legacy 8-bit Cyrillic encodings
//! (CP1251, KOI8-R, ISO-8859-5) into UTF-8.
//!
//! ## Features
//!
//! - **Static lookup tables** for the upper half of each code page
//! - **Streaming conversion** over any `Read`/`Write` pair
//! - **Lazy byte iterator** for in-memory pipelines
//! - **Shareable converters**: tables are read-only, a `Converter` is `Copy`
//!
//! ## Quick Start
//!
//! ```rust
//! use cyrconv::{Converter, Encoding};
//!
//! let converter = Converter::new(Encoding::Cp1251);
//!
//! // "Привет" in Windows-1251
//! let cp1251 = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
//! let utf8 = converter.convert(cp1251);
//! assert_eq!(std::str::from_utf8(&utf8).unwrap(), "Привет");
//! ```

#![deny(missing_docs)]

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

mod convert;
mod file;
pub mod tables;
pub mod utf8;

pub use convert::{ConversionStats, Converter, DEFAULT_BUFFER_SIZE, Utf8Bytes, convert};
pub use file::convert_file;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion
///
/// Every variant is terminal for the whole operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Input source cannot be opened or read
    #[error("input unavailable")]
    InputUnavailable(#[source] io::Error),
    /// Input source contains zero bytes
    #[error("input is empty")]
    EmptyInput,
    /// Output sink cannot be opened or written
    #[error("output unavailable")]
    OutputUnavailable(#[source] io::Error),
    /// Requested encoding name is not one of the supported selectors
    #[error("unsupported encoding '{name}' (supported: CP1251, KOI8-R, ISO-8859-5)")]
    UnsupportedEncoding {
        /// The name as given by the caller
        name: String,
    },
}

/// Supported source encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Windows-1251 (Cyrillic)
    Cp1251,
    /// KOI8-R (Russian, RFC 1489)
    Koi8R,
    /// ISO-8859-5 (Cyrillic)
    Iso8859_5,
}

impl Encoding {
    /// Every supported encoding, in canonical order
    pub const ALL: [Encoding; 3] = [Encoding::Cp1251, Encoding::Koi8R, Encoding::Iso8859_5];

    /// Get the canonical name of this encoding
    ///
    /// This is also the exact selector [`Encoding::from_name`] accepts.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Cp1251 => "CP1251",
            Encoding::Koi8R => "KOI8-R",
            Encoding::Iso8859_5 => "ISO-8859-5",
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Encoding::Cp1251 => "Windows code page for Cyrillic scripts",
            Encoding::Koi8R => "KOI8 Russian, the classic Unix and e-mail Cyrillic encoding",
            Encoding::Iso8859_5 => "ISO/IEC 8859 part 5, Latin/Cyrillic alphabet",
        }
    }

    /// Resolve a selector by case-sensitive exact match
    pub fn from_name(name: &str) -> Result<Self> {
        Encoding::ALL
            .into_iter()
            .find(|encoding| encoding.name() == name)
            .ok_or_else(|| Error::UnsupportedEncoding {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Encoding::from_name(s)
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_names_round_trip() {
        for encoding in Encoding::ALL {
            assert_eq!(Encoding::from_name(encoding.name()).unwrap(), encoding);
            assert_eq!(encoding.name().parse::<Encoding>().unwrap(), encoding);
            assert_eq!(encoding.to_string(), encoding.name());
        }
    }

    #[test]
    fn test_encoding_match_is_exact() {
        for name in ["CP-1251", "cp1251", "KOI8R", "koi8-r", "ISO8859-5", "UTF-8", ""] {
            match Encoding::from_name(name) {
                Err(Error::UnsupportedEncoding { name: rejected }) => assert_eq!(rejected, name),
                other => panic!("{name:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Error::UnsupportedEncoding {
            name: "CP-1251".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported encoding 'CP-1251' (supported: CP1251, KOI8-R, ISO-8859-5)"
        );
        assert_eq!(Error::EmptyInput.to_string(), "input is empty");

        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = Error::InputUnavailable(io_err);
        assert_eq!(err.to_string(), "input unavailable");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_encoding_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Encoding::Koi8R).unwrap(), "\"KOI8-R\"");
        assert_eq!(
            serde_json::to_string(&Encoding::ALL).unwrap(),
            r#"["CP1251","KOI8-R","ISO-8859-5"]"#
        );
    }
}
