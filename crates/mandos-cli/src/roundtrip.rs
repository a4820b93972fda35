//! # Round-Trip Subcommand
//!
//! Loads a fixture, decodes every string that is a value expression (map
//! keys included, since addresses and storage keys are values too), writes
//! the decoded values back, and verifies the rebuilt document is identical
//! to the original.
//!
//! Strings that are not value expressions (step names, comments) are kept
//! as they are. A string that is clearly meant as a value but fails to
//! decode, such as a `file:` reference to a missing file, is reported.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use mandos_core::grammar::{FILE_PREFIX, KECCAK256_PREFIX};
use mandos_core::{write_value, IntFormat, ValueParser};
use serde_json::{Map, Value};

use crate::{parser_with_context, EXIT_MISMATCH};

/// Prefixes that mark a string as intended to be a value expression.
const VALUE_PREFIXES: [&str; 5] = [FILE_PREFIX, KECCAK256_PREFIX, "0x", "0X", "0b"];

/// Arguments for the roundtrip subcommand.
#[derive(Args, Debug)]
pub struct RoundTripArgs {
    /// Fixture file (`*.scen.json` or `*.test.json`).
    pub path: PathBuf,

    /// Write the rebuilt document here.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// What a rewrite pass saw.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoundTripReport {
    /// Strings decoded as values and written back.
    pub values: usize,
    /// Strings kept as plain text.
    pub text: usize,
    /// Value-looking strings that failed to decode, with the reason.
    pub errors: Vec<String>,
}

impl RoundTripReport {
    /// True when nothing that looked like a value failed to decode.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Execute the roundtrip subcommand.
pub fn run_roundtrip(args: &RoundTripArgs) -> Result<u8> {
    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read fixture: {}", args.path.display()))?;
    let doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse fixture JSON: {}", args.path.display()))?;

    let parser = parser_with_context(Some(fixture_dir(&args.path)));
    let mut report = RoundTripReport::default();
    let rebuilt = rewrite_document(&parser, &doc, &mut report);

    let original_text = serde_json::to_string_pretty(&doc)?;
    let rebuilt_text = serde_json::to_string_pretty(&rebuilt)?;
    let identical = rebuilt == doc && rebuilt_text == original_text;

    if let Some(output) = &args.output {
        std::fs::write(output, &rebuilt_text)
            .with_context(|| format!("failed to write output: {}", output.display()))?;
        tracing::info!(output = %output.display(), "wrote rebuilt fixture");
    }

    println!("  fixture: {}", args.path.display());
    println!("  values:  {}", report.values);
    println!("  text:    {}", report.text);
    for error in &report.errors {
        println!("  error:   {error}");
    }

    if identical && report.is_clean() {
        println!("  result:  identical");
        Ok(0)
    } else if !identical {
        println!("  result:  DIFFERS");
        Ok(EXIT_MISMATCH)
    } else {
        println!("  result:  identical, with undecodable values");
        Ok(EXIT_MISMATCH)
    }
}

fn fixture_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Rebuild `node`, decoding and re-writing every value expression in it.
pub fn rewrite_document(parser: &ValueParser, node: &Value, report: &mut RoundTripReport) -> Value {
    match node {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, value) in map {
                let key = rewrite_text(parser, key, report);
                out.insert(key, rewrite_document(parser, value, report));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rewrite_document(parser, item, report))
                .collect(),
        ),
        Value::String(text) => Value::String(rewrite_text(parser, text, report)),
        other => other.clone(),
    }
}

fn rewrite_text(parser: &ValueParser, text: &str, report: &mut RoundTripReport) -> String {
    match parser.decode_check_bytes(text) {
        Ok(check) => {
            report.values += 1;
            let written = write_value(&check);
            // The same text may sit in an integer field.
            if let Ok(int) = parser.decode_check_big_int(text, IntFormat::Signed) {
                let int_written = write_value(&int);
                if int_written != written {
                    tracing::warn!(text, %int_written, "integer text differs");
                    let error = format!("{text:?}: written as {int_written:?} when read as an integer");
                    report.errors.push(error);
                }
            }
            written
        }
        Err(err) => {
            if VALUE_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
                tracing::warn!(text, %err, "value failed to decode");
                report.errors.push(format!("{text:?}: {err}"));
            } else {
                tracing::debug!(text, "kept as plain text");
            }
            report.text += 1;
            text.to_string()
        }
    }
}
