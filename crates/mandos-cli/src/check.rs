//! # Check Subcommand
//!
//! Evaluates an expected fixture value against an actual one, exactly as a
//! test runner would: `*` accepts anything, any other expected value must
//! match byte-for-byte or, for integer formats, numerically.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mandos_core::{write_value, IntFormat, ValueParser};

use crate::decode::OutputFormat;
use crate::{parser_with_context, EXIT_MISMATCH};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Expected value expression, or `*`.
    #[arg(allow_hyphen_values = true)]
    pub expected: String,

    /// Actual value expression.
    #[arg(allow_hyphen_values = true)]
    pub actual: String,

    /// How both values are interpreted.
    #[arg(long, value_enum, default_value_t = OutputFormat::Bytes)]
    pub format: OutputFormat,

    /// Directory `file:` paths are relative to. Defaults to the current directory.
    #[arg(long)]
    pub context: Option<PathBuf>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let parser = parser_with_context(args.context.as_deref());
    let holds = evaluate(&parser, &args.expected, &args.actual, args.format)?;
    if holds {
        println!("ok");
        Ok(0)
    } else {
        println!("mismatch: expected {}, got {}", args.expected, args.actual);
        Ok(EXIT_MISMATCH)
    }
}

/// Decode both sides and evaluate the check.
pub fn evaluate(
    parser: &ValueParser,
    expected: &str,
    actual: &str,
    format: OutputFormat,
) -> Result<bool> {
    let expected_context = || format!("failed to decode expected value {expected:?}");
    let actual_context = || format!("failed to decode actual value {actual:?}");

    let holds = match format {
        OutputFormat::Bytes => {
            let check = parser
                .decode_check_bytes(expected)
                .with_context(expected_context)?;
            let actual = parser.decode(actual).with_context(actual_context)?;
            tracing::debug!(
                expected = %write_value(&check),
                actual = %hex::encode(&actual),
                "checking bytes"
            );
            check.check(&actual)
        }
        OutputFormat::Signed | OutputFormat::Unsigned => {
            let int_format = if format == OutputFormat::Signed {
                IntFormat::Signed
            } else {
                IntFormat::Unsigned
            };
            let check = parser
                .decode_check_big_int(expected, int_format)
                .with_context(expected_context)?;
            let actual = parser
                .decode_big_int(actual, int_format)
                .with_context(actual_context)?;
            check.check(actual.value())
        }
        OutputFormat::U64 => {
            let check = parser
                .decode_check_unsigned64(expected)
                .with_context(expected_context)?;
            let actual = parser
                .decode_unsigned64(actual)
                .with_context(actual_context)?;
            check.check(actual.value())
        }
    };
    Ok(holds)
}
