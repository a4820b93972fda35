//! # JSON Node Entry Points
//!
//! Schema-mapping code walks an order-preserving `serde_json::Value` tree and
//! hands each value-bearing node to one of these functions. Only string nodes
//! hold expressions; anything else is rejected with
//! [`DecodeError::NotAString`].

use serde_json::Value;

use crate::check::{CheckBigInt, CheckBytes, CheckUnsigned, STAR};
use crate::error::DecodeError;
use crate::grammar::ValueParser;
use crate::value::{BigIntValue, ByteValue, IntFormat, UnsignedIntValue};

/// Returns true if `node` is the wildcard string `"*"`.
pub fn is_star(node: &Value) -> bool {
    matches!(node, Value::String(s) if s == STAR)
}

/// The string held by `node`.
pub fn node_str(node: &Value) -> Result<&str, DecodeError> {
    match node {
        Value::String(s) => Ok(s.as_str()),
        other => Err(DecodeError::NotAString {
            found: node_kind(other),
        }),
    }
}

fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

impl ValueParser {
    /// Decode a byte string node.
    pub fn process_bytes(&self, node: &Value) -> Result<ByteValue, DecodeError> {
        self.decode_bytes(node_str(node)?)
    }

    /// Decode an expected byte string node.
    pub fn process_check_bytes(&self, node: &Value) -> Result<CheckBytes, DecodeError> {
        self.decode_check_bytes(node_str(node)?)
    }

    /// Decode an integer node.
    pub fn process_big_int(
        &self,
        node: &Value,
        format: IntFormat,
    ) -> Result<BigIntValue, DecodeError> {
        self.decode_big_int(node_str(node)?, format)
    }

    /// Decode an expected integer node.
    pub fn process_check_big_int(
        &self,
        node: &Value,
        format: IntFormat,
    ) -> Result<CheckBigInt, DecodeError> {
        self.decode_check_big_int(node_str(node)?, format)
    }

    /// Decode a 64-bit unsigned node.
    pub fn process_unsigned64(&self, node: &Value) -> Result<UnsignedIntValue, DecodeError> {
        self.decode_unsigned64(node_str(node)?)
    }

    /// Decode an expected 64-bit unsigned node.
    pub fn process_check_unsigned64(&self, node: &Value) -> Result<CheckUnsigned, DecodeError> {
        self.decode_check_unsigned64(node_str(node)?)
    }
}
