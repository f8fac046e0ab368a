use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::errors::LegacyHashError;

/// Algorithm tag of hashes imported from the previous system.
pub const LEGACY_ALGORITHM_TAG: &str = "pbkdf2_sha256";

const SEPARATOR: char = '$';

/// Codec for the legacy `pbkdf2_sha256$<iterations>$<salt>$<digest-base64>` format.
pub struct LegacyHashCodec;

impl LegacyHashCodec {
    /// Check whether a stored hash carries the legacy algorithm tag.
    ///
    /// Only the prefix is inspected; a `true` result does not mean the rest
    /// of the string parses.
    pub fn is_legacy_format(stored_hash: &str) -> bool {
        stored_hash
            .strip_prefix(LEGACY_ALGORITHM_TAG)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    /// Parse a legacy hash string into its parameters.
    ///
    /// # Arguments
    /// * `stored_hash` - Hash string in legacy format
    ///
    /// # Returns
    /// Parsed parameters; the digest length decides the derived key length
    ///
    /// # Errors
    /// * `MissingSegments` - Fewer than 4 `$`-separated segments
    /// * `UnknownAlgorithm` - First segment is not the legacy tag
    /// * `InvalidIterations` - Iteration segment is not a positive integer
    /// * `InvalidDigest` - Digest segment is not valid base64
    /// * `EmptyDigest` - Digest decodes to zero bytes
    pub fn parse(stored_hash: &str) -> Result<ParsedLegacyHash, LegacyHashError> {
        let segments: Vec<&str> = stored_hash.splitn(4, SEPARATOR).collect();
        let &[algorithm, iterations, salt, digest] = segments.as_slice() else {
            return Err(LegacyHashError::MissingSegments(segments.len()));
        };

        if algorithm != LEGACY_ALGORITHM_TAG {
            return Err(LegacyHashError::UnknownAlgorithm(algorithm.to_string()));
        }

        let iterations = iterations
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(LegacyHashError::InvalidIterations)?;

        let digest = STANDARD
            .decode(digest)
            .map_err(|_| LegacyHashError::InvalidDigest)?;

        if digest.is_empty() {
            return Err(LegacyHashError::EmptyDigest);
        }

        Ok(ParsedLegacyHash {
            iterations,
            salt: salt.to_string(),
            digest,
        })
    }

    /// Produce a legacy hash string from known parameters.
    ///
    /// # Errors
    /// * `InvalidIterations` - `iterations` is zero
    /// * `InvalidSalt` - Salt contains the `$` separator
    /// * `EmptyDigest` - `digest_len` is zero
    pub fn encode(
        password: &str,
        salt: &str,
        iterations: u32,
        digest_len: usize,
    ) -> Result<String, LegacyHashError> {
        if iterations == 0 {
            return Err(LegacyHashError::InvalidIterations);
        }
        if salt.contains(SEPARATOR) {
            return Err(LegacyHashError::InvalidSalt);
        }
        if digest_len == 0 {
            return Err(LegacyHashError::EmptyDigest);
        }

        let mut digest = vec![0u8; digest_len];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut digest);

        Ok(format!(
            "{LEGACY_ALGORITHM_TAG}${iterations}${salt}${}",
            STANDARD.encode(&digest)
        ))
    }
}

/// Parameters recovered from a legacy hash. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedLegacyHash {
    pub iterations: u32,
    pub salt: String,
    pub digest: Vec<u8>,
}

impl ParsedLegacyHash {
    /// Derive a key from `password` and compare it against the stored digest
    /// in constant time.
    pub fn matches(&self, password: &str) -> bool {
        let mut derived = vec![0u8; self.digest.len()];
        pbkdf2_hmac::<Sha256>(
            password.as_bytes(),
            self.salt.as_bytes(),
            self.iterations,
            &mut derived,
        );

        constant_time_eq(&derived, &self.digest)
    }
}

impl fmt::Debug for ParsedLegacyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedLegacyHash")
            .field("algorithm", &LEGACY_ALGORITHM_TAG)
            .field("iterations", &self.iterations)
            .field("digest_len", &self.digest.len())
            .finish_non_exhaustive()
    }
}

/// Byte comparison whose running time depends only on the input length.
///
/// Unequal lengths return early; that reveals the length and nothing else.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7914 section 11: PBKDF2-HMAC-SHA256, P="passwd", S="salt", c=1
    const RFC_DIGEST_64: &str =
        "VawEblbjCJ/sFpHCJUS2BflBhSFt3gRl5oudV8INrLxJypzM8Xm2RZkWZLOdd+8xfHG4RbHjC9UJESBB06GXgw==";
    const RFC_DIGEST_32: &str = "VawEblbjCJ/sFpHCJUS2BflBhSFt3gRl5oudV8INrLw=";

    #[test]
    fn test_is_legacy_format() {
        assert!(LegacyHashCodec::is_legacy_format("pbkdf2_sha256$1$salt$abc="));
        assert!(LegacyHashCodec::is_legacy_format("pbkdf2_sha256$"));
        assert!(!LegacyHashCodec::is_legacy_format("pbkdf2_sha256"));
        assert!(!LegacyHashCodec::is_legacy_format("pbkdf2_sha1$1$salt$abc="));
        assert!(!LegacyHashCodec::is_legacy_format("$argon2id$v=19$m=19456,t=2,p=1$abc$def"));
        assert!(!LegacyHashCodec::is_legacy_format(""));
    }

    #[test]
    fn test_parse_reference_hash() {
        let stored = format!("pbkdf2_sha256$1$salt${RFC_DIGEST_64}");
        let parsed = LegacyHashCodec::parse(&stored).expect("Failed to parse legacy hash");

        assert_eq!(parsed.iterations, 1);
        assert_eq!(parsed.salt, "salt");
        assert_eq!(parsed.digest.len(), 64);
        assert_eq!(parsed.digest[..4], [0x55, 0xac, 0x04, 0x6e]);
    }

    #[test]
    fn test_reference_vector_matches_for_any_digest_length() {
        for digest in [RFC_DIGEST_64, RFC_DIGEST_32] {
            let parsed = LegacyHashCodec::parse(&format!("pbkdf2_sha256$1$salt${digest}"))
                .expect("Failed to parse legacy hash");

            assert!(parsed.matches("passwd"));
            assert!(!parsed.matches("passwd "));
            assert!(!parsed.matches(""));
        }
    }

    #[test]
    fn test_parse_missing_segments() {
        assert_eq!(
            LegacyHashCodec::parse("pbkdf2_sha256$1000$salt"),
            Err(LegacyHashError::MissingSegments(3))
        );
        assert_eq!(
            LegacyHashCodec::parse("pbkdf2_sha256"),
            Err(LegacyHashError::MissingSegments(1))
        );
    }

    #[test]
    fn test_parse_invalid_iterations() {
        for iterations in ["0", "-5", "abc", "", "1.5", "99999999999"] {
            let stored = format!("pbkdf2_sha256${iterations}$salt${RFC_DIGEST_32}");
            assert_eq!(
                LegacyHashCodec::parse(&stored),
                Err(LegacyHashError::InvalidIterations),
                "iterations segment {iterations:?}"
            );
        }
    }

    #[test]
    fn test_parse_invalid_digest() {
        assert_eq!(
            LegacyHashCodec::parse("pbkdf2_sha256$1000$salt$not*base64!"),
            Err(LegacyHashError::InvalidDigest)
        );
        // A fifth segment ends up inside the digest
        assert_eq!(
            LegacyHashCodec::parse(&format!("pbkdf2_sha256$1000$salt${RFC_DIGEST_32}$extra")),
            Err(LegacyHashError::InvalidDigest)
        );
    }

    #[test]
    fn test_parse_empty_digest() {
        assert_eq!(
            LegacyHashCodec::parse("pbkdf2_sha256$1000$salt$"),
            Err(LegacyHashError::EmptyDigest)
        );
    }

    #[test]
    fn test_parse_unknown_algorithm() {
        assert_eq!(
            LegacyHashCodec::parse(&format!("pbkdf2_sha1$1$salt${RFC_DIGEST_32}")),
            Err(LegacyHashError::UnknownAlgorithm("pbkdf2_sha1".to_string()))
        );
    }

    #[test]
    fn test_encode_matches_reference_vector() {
        let encoded = LegacyHashCodec::encode("passwd", "salt", 1, 32).expect("Failed to encode");
        assert_eq!(encoded, format!("pbkdf2_sha256$1$salt${RFC_DIGEST_32}"));
    }

    #[test]
    fn test_encode_then_match() {
        let encoded =
            LegacyHashCodec::encode("correct horse", "NaCl2024", 1000, 32).expect("Failed to encode");
        assert_eq!(
            encoded,
            "pbkdf2_sha256$1000$NaCl2024$0bo17ltICrB15n79U4/5h9U5er+xCF8n2Ko3ItLkC+4="
        );

        let parsed = LegacyHashCodec::parse(&encoded).expect("Failed to parse");
        assert!(parsed.matches("correct horse"));
        assert!(!parsed.matches("correct horsex"));
    }

    #[test]
    fn test_encode_rejects_bad_parameters() {
        assert_eq!(
            LegacyHashCodec::encode("pw", "salt", 0, 32),
            Err(LegacyHashError::InvalidIterations)
        );
        assert_eq!(
            LegacyHashCodec::encode("pw", "sa$lt", 1, 32),
            Err(LegacyHashError::InvalidSalt)
        );
        assert_eq!(
            LegacyHashCodec::encode("pw", "salt", 1, 0),
            Err(LegacyHashError::EmptyDigest)
        );
    }

    #[test]
    fn test_debug_does_not_print_digest() {
        let parsed = LegacyHashCodec::parse(&format!("pbkdf2_sha256$1$salt${RFC_DIGEST_32}"))
            .expect("Failed to parse");
        let output = format!("{:?}", parsed);
        assert!(output.contains("digest_len: 32"));
        assert!(!output.contains("salt: "));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hellp"));
        assert!(!constant_time_eq(b"short", b"longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
