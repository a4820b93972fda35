//! # Decode Subcommand
//!
//! Prints what a single value expression decodes to.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mandos_core::{IntFormat, ValueParser};

use crate::parser_with_context;

/// How to present the decoded value.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw bytes, as `0x`-prefixed hex.
    #[default]
    Bytes,
    /// Two's-complement integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// Unsigned integer that must fit in 64 bits.
    U64,
}

/// Arguments for the decode subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// The value expression, e.g. `0x01|5` or `-256`.
    #[arg(allow_hyphen_values = true)]
    pub expression: String,

    /// Output interpretation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Bytes)]
    pub format: OutputFormat,

    /// Directory `file:` paths are relative to. Defaults to the current directory.
    #[arg(long)]
    pub context: Option<PathBuf>,
}

/// Execute the decode subcommand.
pub fn run_decode(args: &DecodeArgs) -> Result<u8> {
    let parser = parser_with_context(args.context.as_deref());
    let rendered = render(&parser, &args.expression, args.format)?;
    println!("{rendered}");
    Ok(0)
}

/// Decode `expression` and render it in `format`.
pub fn render(parser: &ValueParser, expression: &str, format: OutputFormat) -> Result<String> {
    let context = || format!("failed to decode {expression:?}");
    let rendered = match format {
        OutputFormat::Bytes => {
            let bytes = parser.decode(expression).with_context(context)?;
            format!("0x{}", hex::encode(bytes))
        }
        OutputFormat::Signed => parser
            .decode_big_int(expression, IntFormat::Signed)
            .with_context(context)?
            .value()
            .to_string(),
        OutputFormat::Unsigned => parser
            .decode_big_int(expression, IntFormat::Unsigned)
            .with_context(context)?
            .value()
            .to_string(),
        OutputFormat::U64 => parser
            .decode_unsigned64(expression)
            .with_context(context)?
            .value()
            .to_string(),
    };
    tracing::debug!(expression, %rendered, "decoded");
    Ok(rendered)
}
