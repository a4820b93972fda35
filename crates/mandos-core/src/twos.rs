//! # Signed-Integer Codec
//!
//! Two's-complement encoding layered on the grammar's unsigned byte output.
//! Zero encodes as the empty byte string, and the empty byte string decodes
//! as zero, matching the unsigned convention.

use num_bigint::BigInt;
use num_traits::Zero;

/// Shortest two's-complement big-endian encoding of `n` whose sign bit
/// matches the sign of `n`.
pub fn encode_signed(n: &BigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_signed_bytes_be()
}

/// Interpret `bytes` as a big-endian two's-complement integer.
pub fn decode_signed(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::zero();
    }
    BigInt::from_signed_bytes_be(bytes)
}
