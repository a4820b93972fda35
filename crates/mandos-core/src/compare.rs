//! # Result Comparison and Formatting
//!
//! The VM does not always return minimally encoded results, and fixtures do
//! not always write them minimally either. `equal_as_number` treats two byte
//! strings as equal when they encode the same unsigned integer.
//!
//! The formatting helpers render result lists for assertion messages.

use num_bigint::BigUint;

use crate::check::CheckBytes;
use crate::value::ByteValue;
use crate::write::FixtureText;

/// True if the two byte strings are identical or encode the same unsigned
/// big-endian integer. Leading zero bytes are therefore insignificant.
pub fn equal_as_number(expected: &[u8], actual: &[u8]) -> bool {
    if expected == actual {
        return true;
    }
    BigUint::from_bytes_be(expected) == BigUint::from_bytes_be(actual)
}

/// [`equal_as_number`] against a parsed expectation.
pub fn result_equal(expected: &ByteValue, actual: &[u8]) -> bool {
    equal_as_number(expected.value(), actual)
}

/// Render raw results as `[0x.., 0x..]`.
pub fn result_as_string(results: &[Vec<u8>]) -> String {
    let items: Vec<String> = results
        .iter()
        .map(|r| format!("0x{}", hex::encode(r)))
        .collect();
    format!("[{}]", items.join(", "))
}

/// The decoded bytes of each value.
pub fn byte_values(values: &[ByteValue]) -> Vec<Vec<u8>> {
    values.iter().map(|v| v.value().to_vec()).collect()
}

/// Render expected results the way they appear in the fixture.
pub fn check_bytes_list_string(checks: &[CheckBytes]) -> String {
    let items: Vec<String> = checks
        .iter()
        .map(|c| format!("\"{}\"", c.fixture_text()))
        .collect();
    format!("[{}]", items.join(", "))
}
