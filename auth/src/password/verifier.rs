use super::argon2::PasswordHasher;
use super::legacy::ParsedLegacyHash;
use super::stored_hash::StoredHash;

/// Iteration count of the stand-in hash used when no account exists.
pub const DEFAULT_DUMMY_ITERATIONS: u32 = 260_000;

/// Single entry point for checking a plaintext password against a stored hash.
///
/// Dispatches on the stored encoding: legacy PBKDF2-HMAC-SHA256 or modern
/// Argon2. Every failure mode, including unparsable hashes, is reported as
/// a plain mismatch.
pub struct PasswordVerifier {
    hasher: PasswordHasher,
    dummy: ParsedLegacyHash,
}

impl PasswordVerifier {
    pub fn new() -> Self {
        Self::with_dummy_iterations(DEFAULT_DUMMY_ITERATIONS)
    }

    /// Create a verifier whose unknown-account check costs `iterations`
    /// rounds of PBKDF2.
    pub fn with_dummy_iterations(iterations: u32) -> Self {
        Self {
            hasher: PasswordHasher::new(),
            dummy: ParsedLegacyHash {
                iterations: iterations.max(1),
                salt: "unknown-account".to_string(),
                digest: vec![0u8; 32],
            },
        }
    }

    /// Check `plaintext` against `stored_hash`.
    ///
    /// # Returns
    /// True only if the stored hash parses and the password matches
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        match StoredHash::parse(stored_hash) {
            Ok(StoredHash::Legacy(parsed)) => parsed.matches(plaintext),
            Ok(StoredHash::Modern(parsed)) => self.hasher.verify(plaintext, &parsed),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not in a recognized format");
                false
            }
        }
    }

    /// Spend roughly the cost of a legacy verification without any account.
    ///
    /// Always returns false.
    pub fn verify_dummy(&self, plaintext: &str) -> bool {
        let _ = self.dummy.matches(plaintext);
        false
    }
}

impl Default for PasswordVerifier {
    fn default() -> Self {
        Self::new()
    }
}
