//! # Check Values — Assertions on Expected Results
//!
//! Expected fields in a fixture either demand an exact value or opt out of
//! the comparison with the literal `"*"`. A `CheckValue` is one or the other.

use num_bigint::BigInt;

use crate::value::{BigIntValue, ByteValue, UnsignedIntValue};

/// The literal that accepts any value.
pub const STAR: &str = "*";

/// An expected value: either anything, or exactly the wrapped value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CheckValue<V> {
    /// Written as `"*"`; every candidate passes.
    Star,
    /// Every candidate must equal the wrapped value.
    Exact(V),
}

/// Check on a byte string field.
pub type CheckBytes = CheckValue<ByteValue>;
/// Check on an arbitrary-precision integer field.
pub type CheckBigInt = CheckValue<BigIntValue>;
/// Check on a 64-bit unsigned field.
pub type CheckUnsigned = CheckValue<UnsignedIntValue>;

impl<V> CheckValue<V> {
    /// Returns true for the wildcard.
    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }

    /// The wrapped value, `None` for the wildcard.
    pub fn exact(&self) -> Option<&V> {
        match self {
            Self::Star => None,
            Self::Exact(v) => Some(v),
        }
    }
}

impl<V: Default> Default for CheckValue<V> {
    fn default() -> Self {
        Self::Exact(V::default())
    }
}

impl CheckBytes {
    /// Byte-exact comparison, or true for `"*"`.
    pub fn check(&self, other: &[u8]) -> bool {
        match self {
            Self::Star => true,
            Self::Exact(v) => v.value() == other,
        }
    }
}

impl CheckBigInt {
    /// Numeric comparison, or true for `"*"`.
    pub fn check(&self, other: &BigInt) -> bool {
        match self {
            Self::Star => true,
            Self::Exact(v) => v.value() == other,
        }
    }
}

impl CheckUnsigned {
    /// Numeric comparison, or true for `"*"`.
    pub fn check(&self, other: u64) -> bool {
        match self {
            Self::Star => true,
            Self::Exact(v) => v.value() == other,
        }
    }
}
