//! # Round-Trip Writer
//!
//! Turns decoded values back into fixture text. The original text wins
//! whenever there is one, even when it is `""`, so every field left untouched
//! since parsing is written back exactly as it was read. Values built in memory have no
//! original and get synthesized text that decodes to the same value.
//!
//! Nothing here fails.

use std::borrow::Cow;

use num_bigint::Sign;
use serde_json::Value;

use crate::check::{CheckValue, STAR};
use crate::value::{BigIntValue, ByteValue, UnsignedIntValue};

/// A value that can be written back into a fixture.
pub trait FixtureText {
    /// The text to emit for this value.
    fn fixture_text(&self) -> Cow<'_, str>;

    /// The value as a JSON string node.
    fn to_json(&self) -> Value {
        Value::String(self.fixture_text().into_owned())
    }
}

/// The fixture text of `value`.
pub fn write_value(value: &impl FixtureText) -> String {
    value.fixture_text().into_owned()
}

impl FixtureText for ByteValue {
    /// Unprefixed lowercase hex when there is no original.
    fn fixture_text(&self) -> Cow<'_, str> {
        match self.original() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(hex::encode(self.value())),
        }
    }
}

impl FixtureText for BigIntValue {
    fn fixture_text(&self) -> Cow<'_, str> {
        match self.original() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(int_text(self)),
        }
    }
}

impl FixtureText for UnsignedIntValue {
    fn fixture_text(&self) -> Cow<'_, str> {
        match self.original() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(self.value().to_string()),
        }
    }
}

impl<V: FixtureText> FixtureText for CheckValue<V> {
    fn fixture_text(&self) -> Cow<'_, str> {
        match self {
            Self::Star => Cow::Borrowed(STAR),
            Self::Exact(v) => v.fixture_text(),
        }
    }
}

/// Hex text for an integer that decodes to the same value whether it is
/// later read signed or unsigned: `-` for negatives, `+` when the leading
/// magnitude byte has its high bit set.
fn int_text(value: &BigIntValue) -> String {
    let (sign, magnitude) = value.value().to_bytes_be();
    let digits = hex::encode(&magnitude);
    match sign {
        Sign::NoSign => "0x00".to_string(),
        Sign::Minus => format!("-0x{digits}"),
        Sign::Plus if magnitude[0] & 0x80 != 0 => format!("+0x{digits}"),
        Sign::Plus => format!("0x{digits}"),
    }
}
