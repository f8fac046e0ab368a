use argon2::password_hash::PasswordHash;

use super::errors::PasswordError;
use super::legacy::LegacyHashCodec;
use super::legacy::ParsedLegacyHash;

/// A stored credential hash, classified once by its encoding.
#[derive(Debug)]
pub enum StoredHash<'a> {
    /// PBKDF2-HMAC-SHA256 imported from the previous system
    Legacy(ParsedLegacyHash),
    /// Adaptive hash in PHC string format
    Modern(PasswordHash<'a>),
}

impl<'a> StoredHash<'a> {
    /// Classify and parse a stored hash string.
    ///
    /// Strings carrying the legacy tag are parsed as legacy hashes; anything
    /// else must be a valid PHC string.
    ///
    /// # Errors
    /// * `MalformedHash` - Neither encoding could be parsed
    pub fn parse(encoded: &'a str) -> Result<Self, PasswordError> {
        if LegacyHashCodec::is_legacy_format(encoded) {
            return Ok(StoredHash::Legacy(LegacyHashCodec::parse(encoded)?));
        }

        PasswordHash::new(encoded)
            .map(StoredHash::Modern)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))
    }
}
