//! # Error Types — Structured Decode Errors
//!
//! Defines the error types produced while decoding fixture values. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every decode failure carries the offending (sub-)expression.
//! - Nested failures keep their inner error as `source()`, so a report walks
//!   from the outermost expression down to the innermost cause.
//! - Nothing here is retried or recovered; a malformed value aborts the
//!   document that contains it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric base a literal was parsed in. Named in syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberBase {
    /// `0x`-prefixed literal.
    Hexadecimal,
    /// `0b`-prefixed literal.
    Binary,
    /// Unprefixed literal.
    Decimal,
}

impl NumberBase {
    /// Returns the radix of this base.
    pub fn radix(&self) -> u32 {
        match self {
            Self::Hexadecimal => 16,
            Self::Binary => 2,
            Self::Decimal => 10,
        }
    }

    /// Returns the lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hexadecimal => "hexadecimal",
            Self::Binary => "binary",
            Self::Decimal => "base 10",
        }
    }
}

impl fmt::Display for NumberBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error decoding a fixture value expression.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A numeric literal does not match its declared base.
    #[error("could not parse {base} value: {expression}")]
    Syntax {
        /// The base the literal was parsed in.
        base: NumberBase,
        /// The offending literal, as written.
        expression: String,
    },

    /// A `file:` expression was decoded by a parser with no file resolver.
    #[error("no file resolver provided for {expression}")]
    MissingFileResolver {
        /// The full `file:` expression.
        expression: String,
    },

    /// The file resolver could not produce the file contents.
    #[error("cannot read file value {path}")]
    File {
        /// The path as written after `file:`.
        path: String,
        /// The resolver's error.
        #[source]
        source: std::io::Error,
    },

    /// The argument of a `keccak256:` expression failed to decode.
    #[error("cannot parse keccak256 argument: {expression}")]
    HashArgument {
        /// The argument expression.
        expression: String,
        /// The argument's decode error.
        #[source]
        source: Box<DecodeError>,
    },

    /// The hash function failed.
    #[error("error computing keccak256 of {expression}")]
    Hash {
        /// The argument expression.
        expression: String,
        /// The hash function's error.
        #[source]
        source: HashError,
    },

    /// The decoded value does not fit the requested integer width.
    #[error("value is not uint{bits}: {expression}")]
    OutOfRange {
        /// Width of the target integer type.
        bits: u32,
        /// The offending expression.
        expression: String,
    },

    /// A JSON node expected to hold a value expression is not a string.
    #[error("not a string value, found {found}")]
    NotAString {
        /// Kind of JSON node found instead.
        found: &'static str,
    },
}

/// Error reported by a [`HashFunction`](crate::digest::HashFunction).
#[derive(Error, Debug)]
pub enum HashError {
    /// The hash implementation produced a digest of unexpected length.
    #[error("{algorithm} produced {len} bytes, expected 32")]
    DigestLength {
        /// Name of the algorithm.
        algorithm: &'static str,
        /// Length actually produced.
        len: usize,
    },

    /// The hash backend failed for another reason.
    #[error("hash backend failure: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn syntax_error_names_base_and_text() {
        let err = DecodeError::Syntax {
            base: NumberBase::Binary,
            expression: "0b102".to_string(),
        };
        assert_eq!(err.to_string(), "could not parse binary value: 0b102");
    }

    #[test]
    fn hash_argument_chains_inner_cause() {
        let inner = DecodeError::Syntax {
            base: NumberBase::Decimal,
            expression: "abc".to_string(),
        };
        let err = DecodeError::HashArgument {
            expression: "abc".to_string(),
            source: Box::new(inner),
        };
        let source = err.source().expect("should carry a source");
        assert_eq!(source.to_string(), "could not parse base 10 value: abc");
    }

    #[test]
    fn out_of_range_message() {
        let err = DecodeError::OutOfRange {
            bits: 64,
            expression: "0x010000000000000000".to_string(),
        };
        assert_eq!(err.to_string(), "value is not uint64: 0x010000000000000000");
    }

    #[test]
    fn number_base_radix() {
        assert_eq!(NumberBase::Hexadecimal.radix(), 16);
        assert_eq!(NumberBase::Binary.radix(), 2);
        assert_eq!(NumberBase::Decimal.radix(), 10);
    }
}
