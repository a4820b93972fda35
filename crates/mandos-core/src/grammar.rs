//! # Byte-Value Grammar
//!
//! Decodes the expression language used inside fixture JSON strings into
//! byte strings. Evaluation inspects prefixes and content in a fixed order;
//! the first rule that applies wins:
//!
//! 1. `""` → empty bytes.
//! 2. `file:<path>` → contents of a file, via the [`FileResolver`].
//! 3. `keccak256:<expr>` → digest of the decoded `<expr>`, via the
//!    [`HashFunction`].
//! 4. anything containing `|` → each part decoded, results concatenated.
//!    Empty parts contribute nothing, so `"|||"` is the empty string.
//! 5. `true` → `0x01`, `false` → empty.
//! 6. ``` `` ``` or `''` prefix → the rest, verbatim, as bytes.
//! 7. `+` / `-` prefix → an unsigned literal re-encoded in two's complement.
//!    `+` keeps non-negative values non-negative by adding a zero byte when
//!    the high bit would otherwise be set.
//! 8. otherwise an unsigned literal: `0x` hex, `0b` binary, or decimal, with
//!    `_` and `,` allowed as digit separators. Zero is the empty string.
//!
//! Because `file:` and `keccak256:` are tested first, their arguments may
//! themselves contain `|`.

use std::fmt;
use std::path::Path;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::check::{CheckBigInt, CheckBytes, CheckUnsigned, CheckValue, STAR};
use crate::digest::{HashFunction, Keccak256};
use crate::error::{DecodeError, NumberBase};
use crate::resolver::FileResolver;
use crate::twos;
use crate::value::{BigIntValue, ByteValue, IntFormat, UnsignedIntValue};

/// Prefix of expressions that embed file contents.
pub const FILE_PREFIX: &str = "file:";
/// Prefix of expressions that hash their argument.
pub const KECCAK256_PREFIX: &str = "keccak256:";
/// Separator of concatenated parts.
pub const CONCAT_SEPARATOR: char = '|';

const ASCII_PREFIXES: [&str; 2] = ["``", "''"];

/// Decoder for fixture value expressions.
///
/// Holds the two collaborators the grammar needs and nothing else, so
/// decoding is deterministic for a fixed resolver context. Use one parser
/// per document: set the context directory once, then decode its fields.
pub struct ValueParser {
    file_resolver: Option<Box<dyn FileResolver>>,
    hasher: Box<dyn HashFunction>,
}

impl Default for ValueParser {
    fn default() -> Self {
        Self {
            file_resolver: None,
            hasher: Box::new(Keccak256),
        }
    }
}

impl fmt::Debug for ValueParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParser")
            .field("file_resolver", &self.file_resolver.is_some())
            .field("hasher", &self.hasher.algorithm())
            .finish()
    }
}

impl ValueParser {
    /// A parser with no file resolver and Keccak-256 hashing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `resolver` for `file:` expressions.
    pub fn with_file_resolver(mut self, resolver: impl FileResolver + 'static) -> Self {
        self.file_resolver = Some(Box::new(resolver));
        self
    }

    /// Use `hasher` for `keccak256:` expressions.
    pub fn with_hasher(mut self, hasher: impl HashFunction + 'static) -> Self {
        self.hasher = Box::new(hasher);
        self
    }

    /// Point the file resolver at the directory of the document about to be
    /// parsed. A no-op without a resolver.
    pub fn set_context(&mut self, context_path: &Path) {
        if let Some(resolver) = self.file_resolver.as_mut() {
            resolver.set_context(context_path);
        }
    }

    /// Decode an expression to bytes.
    pub fn decode(&self, expression: &str) -> Result<Vec<u8>, DecodeError> {
        if expression.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(path) = expression.strip_prefix(FILE_PREFIX) {
            return self.decode_file(expression, path);
        }

        if let Some(argument) = expression.strip_prefix(KECCAK256_PREFIX) {
            return self.decode_keccak256(argument);
        }

        if expression.contains(CONCAT_SEPARATOR) {
            let mut concat = Vec::new();
            for part in expression.split(CONCAT_SEPARATOR) {
                concat.extend(self.decode(part)?);
            }
            return Ok(concat);
        }

        match expression {
            "true" => return Ok(vec![0x01]),
            "false" => return Ok(Vec::new()),
            _ => {}
        }

        if let Some(text) = ASCII_PREFIXES
            .iter()
            .find_map(|prefix| expression.strip_prefix(*prefix))
        {
            return Ok(text.as_bytes().to_vec());
        }

        if let Some(magnitude) = expression.strip_prefix('-') {
            let n = BigInt::from_bytes_be(Sign::Plus, &decode_unsigned_literal(magnitude)?);
            return Ok(twos::encode_signed(&-n));
        }

        if let Some(magnitude) = expression.strip_prefix('+') {
            let n = BigInt::from_bytes_be(Sign::Plus, &decode_unsigned_literal(magnitude)?);
            return Ok(twos::encode_signed(&n));
        }

        decode_unsigned_literal(expression)
    }

    /// Decode an expression, keeping its text.
    pub fn decode_bytes(&self, expression: &str) -> Result<ByteValue, DecodeError> {
        let decoded = self.decode(expression)?;
        Ok(ByteValue::parsed(decoded, expression))
    }

    /// Decode an expression as an integer in `format`, keeping its text.
    pub fn decode_big_int(
        &self,
        expression: &str,
        format: IntFormat,
    ) -> Result<BigIntValue, DecodeError> {
        let bytes = self.decode(expression)?;
        Ok(BigIntValue::parsed(format.interpret(&bytes), expression))
    }

    /// Decode an expression as a two's-complement integer.
    pub fn decode_signed(&self, expression: &str) -> Result<BigInt, DecodeError> {
        Ok(twos::decode_signed(&self.decode(expression)?))
    }

    /// Decode an expression as an unsigned integer that must fit in 64 bits.
    pub fn decode_unsigned64(&self, expression: &str) -> Result<UnsignedIntValue, DecodeError> {
        let big = self.decode_big_int(expression, IntFormat::Unsigned)?;
        let decoded = big.value().to_u64().ok_or_else(|| DecodeError::OutOfRange {
            bits: u64::BITS,
            expression: expression.to_string(),
        })?;
        Ok(UnsignedIntValue::parsed(decoded, expression))
    }

    /// Decode an expected byte string; `"*"` accepts anything.
    pub fn decode_check_bytes(&self, expression: &str) -> Result<CheckBytes, DecodeError> {
        if expression == STAR {
            return Ok(CheckValue::Star);
        }
        self.decode_bytes(expression).map(CheckValue::Exact)
    }

    /// Decode an expected integer; `"*"` accepts anything.
    pub fn decode_check_big_int(
        &self,
        expression: &str,
        format: IntFormat,
    ) -> Result<CheckBigInt, DecodeError> {
        if expression == STAR {
            return Ok(CheckValue::Star);
        }
        self.decode_big_int(expression, format).map(CheckValue::Exact)
    }

    /// Decode an expected 64-bit unsigned integer; `"*"` accepts anything.
    pub fn decode_check_unsigned64(&self, expression: &str) -> Result<CheckUnsigned, DecodeError> {
        if expression == STAR {
            return Ok(CheckValue::Star);
        }
        self.decode_unsigned64(expression).map(CheckValue::Exact)
    }

    fn decode_file(&self, expression: &str, path: &str) -> Result<Vec<u8>, DecodeError> {
        let resolver = self
            .file_resolver
            .as_ref()
            .ok_or_else(|| DecodeError::MissingFileResolver {
                expression: expression.to_string(),
            })?;
        let contents = resolver
            .resolve_file_value(path)
            .map_err(|source| DecodeError::File {
                path: path.to_string(),
                source,
            })?;
        tracing::trace!(path, len = contents.len(), "decoded file value");
        Ok(contents)
    }

    fn decode_keccak256(&self, argument: &str) -> Result<Vec<u8>, DecodeError> {
        let data = self
            .decode(argument)
            .map_err(|source| DecodeError::HashArgument {
                expression: argument.to_string(),
                source: Box::new(source),
            })?;
        let digest = self.hasher.hash(&data).map_err(|source| DecodeError::Hash {
            expression: argument.to_string(),
            source,
        })?;
        tracing::trace!(%digest, "decoded hash value");
        Ok(digest.to_vec())
    }
}

/// Decode an unsigned numeric literal to its big-endian bytes.
fn decode_unsigned_literal(literal: &str) -> Result<Vec<u8>, DecodeError> {
    let digits: String = literal.chars().filter(|c| *c != '_' && *c != ',').collect();

    if let Some(hex_digits) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        let padded = if hex_digits.len() % 2 == 1 {
            format!("0{hex_digits}")
        } else {
            hex_digits.to_string()
        };
        return hex::decode(padded).map_err(|_| syntax_error(NumberBase::Hexadecimal, literal));
    }

    if let Some(bin_digits) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        return parse_radix(bin_digits, NumberBase::Binary, literal);
    }

    parse_radix(&digits, NumberBase::Decimal, literal)
}

fn parse_radix(digits: &str, base: NumberBase, literal: &str) -> Result<Vec<u8>, DecodeError> {
    let radix = base.radix();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(syntax_error(base, literal));
    }
    let n = BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| syntax_error(base, literal))?;
    if n.is_zero() {
        return Ok(Vec::new());
    }
    Ok(n.to_bytes_be())
}

fn syntax_error(base: NumberBase, literal: &str) -> DecodeError {
    DecodeError::Syntax {
        base,
        expression: literal.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{Digest, DigestAlgorithm, Sha256};
    use crate::error::HashError;
    use std::error::Error as _;

    fn decode(expression: &str) -> Vec<u8> {
        ValueParser::new()
            .decode(expression)
            .unwrap_or_else(|e| panic!("{expression:?} should decode: {e}"))
    }

    fn keccak(data: &[u8]) -> Vec<u8> {
        Keccak256.hash(data).unwrap().to_vec()
    }

    #[test]
    fn empty() {
        assert_eq!(decode(""), Vec::<u8>::new());
    }

    #[test]
    fn bool_literals() {
        assert_eq!(decode("true"), vec![0x01]);
        assert_eq!(decode("false"), Vec::<u8>::new());
    }

    #[test]
    fn ascii_strings() {
        assert_eq!(decode("``abcdefg"), b"abcdefg".to_vec());
        assert_eq!(decode("''abcdefg"), b"abcdefg".to_vec());
        assert_eq!(decode("``"), Vec::<u8>::new());
        assert_eq!(decode("```"), b"`".to_vec());
        assert_eq!(decode("`` "), b" ".to_vec());
        assert_eq!(decode("``0x01"), b"0x01".to_vec());
        assert_eq!(decode("''true"), b"true".to_vec());
    }

    #[test]
    fn unsigned_numbers() {
        assert_eq!(decode("0x1234"), vec![0x12, 0x34]);
        assert_eq!(decode("0X1234"), vec![0x12, 0x34]);
        assert_eq!(decode("0x"), Vec::<u8>::new());
        assert_eq!(decode("0x123"), vec![0x01, 0x23]);
        assert_eq!(decode("0"), Vec::<u8>::new());
        assert_eq!(decode("12"), vec![12]);
        assert_eq!(decode("256"), vec![0x01, 0x00]);
        assert_eq!(decode("0b1"), vec![0x01]);
        assert_eq!(decode("0b101"), vec![0x05]);
        assert_eq!(decode("0B100000000"), vec![0x01, 0x00]);
        assert_eq!(decode("0b0"), Vec::<u8>::new());
    }

    #[test]
    fn hex_keeps_leading_zero_bytes() {
        assert_eq!(decode("0x0001"), vec![0x00, 0x01]);
        assert_eq!(decode("0x00"), vec![0x00]);
    }

    #[test]
    fn digit_separators() {
        assert_eq!(decode("1_000_000"), decode("1000000"));
        assert_eq!(decode("1,000,000"), vec![0x0f, 0x42, 0x40]);
        assert_eq!(decode("0b1_0000_0000"), vec![0x01, 0x00]);
        assert_eq!(decode("0x12_34"), vec![0x12, 0x34]);
    }

    #[test]
    fn signed_numbers() {
        assert_eq!(decode("-1"), vec![0xff]);
        assert_eq!(decode("255"), vec![0xff]);
        assert_eq!(decode("+255"), vec![0x00, 0xff]);
        assert_eq!(decode("0xff"), vec![0xff]);
        assert_eq!(decode("+0xff"), vec![0x00, 0xff]);
        assert_eq!(decode("-256"), vec![0xff, 0x00]);
        assert_eq!(decode("-0b101"), vec![0xfb]);
        assert_eq!(decode("+1"), vec![0x01]);
        assert_eq!(decode("-0"), Vec::<u8>::new());
        assert_eq!(decode("+0"), Vec::<u8>::new());
    }

    #[test]
    fn concatenation() {
        assert_eq!(decode("0x01|5"), vec![0x01, 0x05]);
        assert_eq!(decode("|||0x01|5||||"), vec![0x01, 0x05]);
        assert_eq!(decode("|"), Vec::<u8>::new());
        assert_eq!(decode("|||"), Vec::<u8>::new());
        assert_eq!(decode("|||||||"), Vec::<u8>::new());
        assert_eq!(decode("|0"), Vec::<u8>::new());
        assert_eq!(decode("``a|``b"), b"ab".to_vec());
        assert_eq!(decode("``a|0x62"), b"ab".to_vec());
        assert_eq!(decode("0x61|``b"), b"ab".to_vec());
        assert_eq!(decode("-1|+255|true"), vec![0xff, 0x00, 0xff, 0x01]);
    }

    #[test]
    fn concatenation_is_part_wise() {
        for (a, b) in [("0x01", "5"), ("``ab", "-1"), ("true", "0b11"), ("", "256")] {
            let mut expected = decode(a);
            expected.extend(decode(b));
            assert_eq!(decode(&format!("{a}|{b}")), expected);
        }
    }

    #[test]
    fn keccak256_expressions() {
        assert_eq!(decode("keccak256:0x01|5"), keccak(&[0x01, 0x05]));
        assert_eq!(decode("keccak256:|||0x01|5||||"), keccak(&[0x01, 0x05]));
        assert_eq!(decode("keccak256:|"), keccak(&[]));
        assert_eq!(decode("keccak256:|||||||"), keccak(&[]));
        assert_eq!(decode("keccak256:|0"), keccak(&[]));
        assert_eq!(decode("keccak256:``a|``b"), keccak(b"ab"));
        assert_eq!(decode("keccak256:``a|0x62"), keccak(b"ab"));
        assert_eq!(decode("keccak256:0x61|``b"), keccak(b"ab"));
        assert_eq!(decode("keccak256:"), keccak(&[]));
    }

    #[test]
    fn keccak256_nests() {
        let inner = keccak(b"x");
        assert_eq!(decode("keccak256:keccak256:``x"), keccak(&inner));
    }

    #[test]
    fn keccak256_known_storage_keys() {
        let cases = [
            (
                "keccak256:1|0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b000000000000000000000000",
                "19efaebcc296cffac396adb4a60d54c05eff43926a6072498a618e943908efe1",
            ),
            (
                "keccak256:1|0x7777777777777777777707777777777777777777777777177777777777771234",
                "a3da7395b9df9b4a0ad4ce2fd40d2db4c5b231dbc2a19ce9bafcbc2233dc1b0a",
            ),
            (
                "keccak256:1|0x5555555555555555555505555555555555555555555555155555555555551234",
                "648147902a606bf61e05b8b9d828540be393187d2c12a271b45315628f8b05b9",
            ),
            (
                "keccak256:2|0x7777777777777777777707777777777777777777777777177777777777771234|0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b000000000000000000000000",
                "e314ce9b5b28a5927ee30ba28b67ee27ad8779e1101baf4224590c8f1e287891",
            ),
        ];
        for (expression, digest) in cases {
            assert_eq!(hex::encode(decode(expression)), digest, "{expression}");
        }
    }

    #[test]
    fn pluggable_hasher() {
        let parser = ValueParser::new().with_hasher(Sha256);
        let decoded = parser.decode("keccak256:``abc").unwrap();
        assert_eq!(decoded, Sha256.hash(b"abc").unwrap().to_vec());
    }

    #[test]
    fn malformed_literals_name_the_base() {
        let parser = ValueParser::new();
        let cases = [
            ("0xzz", NumberBase::Hexadecimal, "0xzz"),
            ("0b102", NumberBase::Binary, "0b102"),
            ("0b", NumberBase::Binary, "0b"),
            ("12a", NumberBase::Decimal, "12a"),
            ("*", NumberBase::Decimal, "*"),
            ("-", NumberBase::Decimal, ""),
            ("-abc", NumberBase::Decimal, "abc"),
            ("+-1", NumberBase::Decimal, "-1"),
        ];
        for (input, base, offending) in cases {
            match parser.decode(input) {
                Err(DecodeError::Syntax {
                    base: b,
                    expression,
                }) => {
                    assert_eq!(b, base, "{input}");
                    assert_eq!(expression, offending, "{input}");
                }
                other => panic!("{input:?}: expected syntax error, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_part_fails_concatenation() {
        let err = ValueParser::new().decode("0x01|zz|5").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax { ref expression, .. } if expression == "zz"));
    }

    #[test]
    fn malformed_keccak_argument_is_wrapped() {
        let err = ValueParser::new().decode("keccak256:0x01|xyz").unwrap_err();
        match &err {
            DecodeError::HashArgument { expression, .. } => assert_eq!(expression, "0x01|xyz"),
            other => panic!("expected HashArgument, got {other:?}"),
        }
        let inner = err.source().expect("inner cause");
        assert_eq!(inner.to_string(), "could not parse base 10 value: xyz");
    }

    #[test]
    fn file_without_resolver_fails() {
        let err = ValueParser::new().decode("file:code.wasm").unwrap_err();
        assert!(matches!(err, DecodeError::MissingFileResolver { .. }));
    }

    struct FixedResolver;

    impl FileResolver for FixedResolver {
        fn set_context(&mut self, _context_path: &Path) {}

        fn resolve_absolute_path(&self, value: &str) -> std::path::PathBuf {
            std::path::PathBuf::from(value)
        }

        fn resolve_file_value(&self, value: &str) -> std::io::Result<Vec<u8>> {
            match value {
                "hello.txt" => Ok(b"hello!".to_vec()),
                _ => Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file")),
            }
        }
    }

    #[test]
    fn file_contents_from_resolver() {
        let parser = ValueParser::new().with_file_resolver(FixedResolver);
        assert_eq!(parser.decode("file:hello.txt").unwrap(), b"hello!".to_vec());
        assert_eq!(
            parser.decode("keccak256:file:hello.txt").unwrap(),
            keccak(b"hello!")
        );
    }

    #[test]
    fn file_prefix_takes_precedence_over_pipes() {
        let parser = ValueParser::new().with_file_resolver(FixedResolver);
        let err = parser.decode("file:hello.txt|0x01").unwrap_err();
        match err {
            DecodeError::File { path, source } => {
                assert_eq!(path, "hello.txt|0x01");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected File error, got {other:?}"),
        }
        assert_eq!(parser.decode("0x01|file:hello.txt").unwrap(), b"\x01hello!".to_vec());
    }

    struct FailingHasher;

    impl HashFunction for FailingHasher {
        fn algorithm(&self) -> DigestAlgorithm {
            DigestAlgorithm::Keccak256
        }

        fn hash(&self, _data: &[u8]) -> Result<Digest, HashError> {
            Err(HashError::Backend("unavailable".to_string()))
        }
    }

    #[test]
    fn hash_failure_propagates() {
        let parser = ValueParser::new().with_hasher(FailingHasher);
        let err = parser.decode("keccak256:0x01").unwrap_err();
        assert!(matches!(err, DecodeError::Hash { ref expression, .. } if expression == "0x01"));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("hash backend failure: unavailable".to_string())
        );
    }

    #[test]
    fn typed_decoders() {
        let parser = ValueParser::new();
        let v = parser.decode_bytes("0x01|5").unwrap();
        assert_eq!(v.value(), &[0x01u8, 0x05][..]);
        assert_eq!(v.original(), Some("0x01|5"));

        let signed = parser.decode_big_int("0xff", IntFormat::Signed).unwrap();
        assert_eq!(signed.value(), &BigInt::from(-1));
        let unsigned = parser.decode_big_int("0xff", IntFormat::Unsigned).unwrap();
        assert_eq!(unsigned.value(), &BigInt::from(255));
        assert_eq!(unsigned.original(), Some("0xff"));

        assert_eq!(parser.decode_signed("-256").unwrap(), BigInt::from(-256));
        assert_eq!(parser.decode_signed("+255").unwrap(), BigInt::from(255));
    }

    #[test]
    fn unsigned64_bounds() {
        let parser = ValueParser::new();
        assert_eq!(parser.decode_unsigned64("0").unwrap().value(), 0);
        let max = parser.decode_unsigned64("18,446,744,073,709,551,615").unwrap();
        assert_eq!(max.value(), u64::MAX);
        assert_eq!(max.original(), Some("18,446,744,073,709,551,615"));

        let err = parser.decode_unsigned64("18446744073709551616").unwrap_err();
        assert!(matches!(err, DecodeError::OutOfRange { bits: 64, .. }));
    }

    #[test]
    fn check_decoders() {
        let parser = ValueParser::new();
        assert!(parser.decode_check_bytes("*").unwrap().is_star());
        assert!(parser.decode_check_big_int("*", IntFormat::Signed).unwrap().is_star());
        assert!(parser.decode_check_unsigned64("*").unwrap().is_star());

        let check = parser.decode_check_bytes("0x01").unwrap();
        assert!(check.check(&[0x01]));
        assert!(!check.check(&[0x02]));

        let check = parser.decode_check_big_int("-1", IntFormat::Signed).unwrap();
        assert!(check.check(&BigInt::from(-1)));

        let check = parser.decode_check_unsigned64("100").unwrap();
        assert!(check.check(100));
        assert!(parser.decode_check_unsigned64("0x010000000000000000").is_err());
    }

    #[test]
    fn star_inside_expression_is_not_a_wildcard() {
        let parser = ValueParser::new();
        assert!(parser.decode_check_bytes("*|0x01").is_err());
        assert!(parser.decode_check_bytes("``*").unwrap().check(b"*"));
    }

    #[test]
    fn configured_parser_moves_to_worker_thread() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValueParser>();

        let parser = ValueParser::new().with_file_resolver(FixedResolver);
        let decoded = std::thread::spawn(move || parser.decode("0x01|file:hello.txt"))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(decoded, b"\x01hello!".to_vec());
    }

    #[test]
    fn debug_does_not_expose_collaborators() {
        let parser = ValueParser::new();
        let s = format!("{parser:?}");
        assert!(s.contains("Keccak256"));
        assert!(s.contains("file_resolver: false"));
    }
}
