//! # mandos-core — Value Codec for Mandos Test Fixtures
//!
//! Mandos fixtures are JSON documents describing account states, transactions,
//! and expected results for a virtual-machine test run. Every numeric or byte
//! field in those documents is a JSON string written in a small expression
//! language. This crate decodes that language and writes it back losslessly.
//!
//! ## Key Design Principles
//!
//! 1. **Original text travels with the value.** `ByteValue`, `BigIntValue`
//!    and `UnsignedIntValue` keep the exact source text next to the decoded
//!    data. The writer emits it verbatim, so parse-then-write reproduces an
//!    untouched document byte-for-byte.
//!
//! 2. **Prefix dispatch, fixed precedence.** `file:` and `keccak256:` are
//!    recognized before `|` concatenation, which is recognized before any
//!    literal form. See [`grammar`].
//!
//! 3. **Injected collaborators.** File contents come from a [`FileResolver`]
//!    and digests from a [`HashFunction`]. A `ValueParser` owns one of each
//!    and holds no other state.
//!
//! 4. **Wildcards are a variant, not a flag.** `CheckValue::Star` cannot carry
//!    a stale decoded value.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The writer and comparator never fail.

pub mod check;
pub mod compare;
pub mod digest;
pub mod error;
pub mod grammar;
pub mod node;
pub mod resolver;
pub mod twos;
pub mod value;
pub mod write;

// Re-export primary types for ergonomic imports.
pub use check::{CheckBigInt, CheckBytes, CheckUnsigned, CheckValue};
pub use compare::{
    byte_values, check_bytes_list_string, equal_as_number, result_as_string, result_equal,
};
pub use digest::{Digest, DigestAlgorithm, HashFunction, Keccak256, Sha256};
pub use error::{DecodeError, HashError, NumberBase};
pub use grammar::ValueParser;
pub use node::{is_star, node_str};
pub use resolver::{DefaultFileResolver, FileResolver};
pub use twos::{decode_signed, encode_signed};
pub use value::{BigIntValue, ByteValue, IntFormat, UnsignedIntValue};
pub use write::{write_value, FixtureText};
