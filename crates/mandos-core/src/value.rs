//! # Fixture Values — Decoded Data Plus Original Text
//!
//! Each value type keeps the verbatim string it was decoded from next to the
//! decoded data. Values built in memory have no source text, and the writer
//! synthesizes text for them. A value parsed from `""` does have source text:
//! the empty string.
//!
//! ## Invariant
//!
//! When `original` is present, decoding it yields `decoded`. Values with
//! text are only constructed by the grammar, which upholds this.

use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};

use crate::twos;

/// How a decoded byte string is read as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntFormat {
    /// Two's-complement, sign taken from the first bit.
    Signed,
    /// Unsigned big-endian magnitude.
    Unsigned,
}

impl IntFormat {
    /// Read `bytes` as an integer in this format.
    pub fn interpret(&self, bytes: &[u8]) -> BigInt {
        match self {
            Self::Signed => twos::decode_signed(bytes),
            Self::Unsigned => BigInt::from_bytes_be(Sign::Plus, bytes),
        }
    }
}

/// A byte string field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteValue {
    decoded: Vec<u8>,
    original: Option<String>,
}

impl ByteValue {
    /// A value built in memory, with no source text.
    pub fn from_bytes(decoded: impl Into<Vec<u8>>) -> Self {
        Self {
            decoded: decoded.into(),
            original: None,
        }
    }

    pub(crate) fn parsed(decoded: Vec<u8>, original: &str) -> Self {
        Self {
            decoded,
            original: Some(original.to_string()),
        }
    }

    /// The decoded bytes.
    pub fn value(&self) -> &[u8] {
        &self.decoded
    }

    /// The source text, `None` for in-memory values.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Consume the value, returning the decoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.decoded
    }
}

/// An arbitrary-precision integer field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigIntValue {
    decoded: BigInt,
    original: Option<String>,
}

impl BigIntValue {
    /// A value built in memory, with no source text.
    pub fn from_int(decoded: impl Into<BigInt>) -> Self {
        Self {
            decoded: decoded.into(),
            original: None,
        }
    }

    pub(crate) fn parsed(decoded: BigInt, original: &str) -> Self {
        Self {
            decoded,
            original: Some(original.to_string()),
        }
    }

    /// The decoded integer.
    pub fn value(&self) -> &BigInt {
        &self.decoded
    }

    /// The source text, `None` for in-memory values.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }
}

/// A 64-bit unsigned integer field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UnsignedIntValue {
    decoded: u64,
    original: Option<String>,
}

impl UnsignedIntValue {
    /// A value built in memory, with no source text.
    pub fn from_u64(decoded: u64) -> Self {
        Self {
            decoded,
            original: None,
        }
    }

    pub(crate) fn parsed(decoded: u64, original: &str) -> Self {
        Self {
            decoded,
            original: Some(original.to_string()),
        }
    }

    /// The decoded integer.
    pub fn value(&self) -> u64 {
        self.decoded
    }

    /// The source text, `None` for in-memory values.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }
}
