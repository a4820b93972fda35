//! # Compare Subcommand
//!
//! Numeric-equivalence comparison: two results match when their bytes are
//! identical or encode the same unsigned integer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mandos_core::{equal_as_number, result_as_string};

use crate::{parser_with_context, EXIT_MISMATCH};

/// Arguments for the compare subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Expected result expression.
    #[arg(allow_hyphen_values = true)]
    pub expected: String,

    /// Actual result expression.
    #[arg(allow_hyphen_values = true)]
    pub actual: String,

    /// Directory `file:` paths are relative to. Defaults to the current directory.
    #[arg(long)]
    pub context: Option<PathBuf>,
}

/// Execute the compare subcommand.
pub fn run_compare(args: &CompareArgs) -> Result<u8> {
    let parser = parser_with_context(args.context.as_deref());
    let expected = parser
        .decode(&args.expected)
        .with_context(|| format!("failed to decode expected value {:?}", args.expected))?;
    let actual = parser
        .decode(&args.actual)
        .with_context(|| format!("failed to decode actual value {:?}", args.actual))?;

    if equal_as_number(&expected, &actual) {
        println!("ok");
        Ok(0)
    } else {
        let rendered = result_as_string(&[expected, actual]);
        println!("mismatch: [expected, actual] = {rendered}");
        Ok(EXIT_MISMATCH)
    }
}
