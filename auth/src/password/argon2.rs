use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Modern password hashing.
///
/// New credentials are hashed with Argon2id and stored as PHC strings.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against an already parsed PHC hash.
    ///
    /// The comparison of the recomputed output is constant-time inside the
    /// `password-hash` crate. Unsupported algorithms or parameters count as
    /// a mismatch.
    pub fn verify(&self, password: &str, hash: &PasswordHash<'_>) -> bool {
        self.argon2
            .verify_password(password.as_bytes(), hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).expect("Failed to parse hash");
        assert!(hasher.verify(password, &parsed));
        assert!(!hasher.verify("wrong_password", &parsed));
        assert!(!hasher.verify("my_secure_passwordx", &parsed));
    }

    #[test]
    fn test_hash_uses_random_salt() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same").expect("Failed to hash password");
        let second = hasher.hash("same").expect("Failed to hash password");
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_empty_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("").expect("Failed to hash password");
        let parsed = PasswordHash::new(&hash).expect("Failed to parse hash");

        assert!(hasher.verify("", &parsed));
        assert!(!hasher.verify(" ", &parsed));
    }
}
