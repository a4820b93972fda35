//! # mandos-cli — Command-Line Access to the Fixture Value Codec
//!
//! Provides the `mandos` command for fixture authors who want to see what a
//! value expression decodes to, try an assertion, or confirm a fixture
//! survives a parse-then-write cycle unchanged.
//!
//! ## Subcommands
//!
//! - `mandos decode`: Decode one expression.
//! - `mandos check`: Evaluate an expected value (possibly `*`) against an actual one.
//! - `mandos compare`: Numeric-equivalence comparison of two results.
//! - `mandos roundtrip`: Verify a fixture file round-trips losslessly.
//!
//! ```bash
//! mandos decode 'keccak256:1|0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b000000000000000000000000'
//! mandos decode -256 --format signed
//! mandos check '*' 0x01
//! mandos roundtrip tests/adder.scen.json
//! ```
//!
//! Handlers return the process exit code: 0 on success, 2 when a check,
//! comparison, or round trip does not hold. Errors exit with 1.

pub mod check;
pub mod compare;
pub mod decode;
pub mod roundtrip;

use std::path::{Path, PathBuf};

use mandos_core::{DefaultFileResolver, ValueParser};

/// Exit code for a check, comparison, or round trip that does not hold.
pub const EXIT_MISMATCH: u8 = 2;

/// A parser resolving `file:` values against `context`, or against the
/// current directory when none is given.
pub fn parser_with_context(context: Option<&Path>) -> ValueParser {
    let mut parser = ValueParser::new().with_file_resolver(DefaultFileResolver::new());
    let dir = context
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    parser.set_context(&dir);
    parser
}
