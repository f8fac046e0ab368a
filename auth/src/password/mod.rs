pub mod argon2;
pub mod errors;
pub mod legacy;
pub mod stored_hash;
pub mod verifier;

pub use argon2::PasswordHasher;
pub use errors::LegacyHashError;
pub use errors::PasswordError;
pub use legacy::LegacyHashCodec;
pub use legacy::ParsedLegacyHash;
pub use stored_hash::StoredHash;
pub use verifier::PasswordVerifier;
