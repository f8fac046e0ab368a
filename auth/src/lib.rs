//! Authentication utilities library
//!
//! Provides the credential verification and token issuance core:
//! - Password verification over legacy PBKDF2-HMAC-SHA256 and Argon2id hashes
//! - Role/subscription authorization before issuance
//! - Signed token generation and validation
//! - Login coordination
//!
//! Services keep their own user entities and convert them into a
//! [`Principal`] when they need a decision from this crate.
//!
//! # Examples
//!
//! ## Password Verification
//! ```
//! use auth::{LegacyHashCodec, PasswordHasher, PasswordVerifier};
//!
//! let verifier = PasswordVerifier::new();
//!
//! let modern = PasswordHasher::new().hash("my_password").unwrap();
//! assert!(verifier.verify("my_password", &modern));
//!
//! let legacy = LegacyHashCodec::encode("my_password", "salt", 1000, 32).unwrap();
//! assert!(verifier.verify("my_password", &legacy));
//! assert!(!verifier.verify("my_password", "pbkdf2_sha256$broken"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Principal, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::seconds(3600));
//! let principal = Principal {
//!     user_id: "user123".to_string(),
//!     email: "alice@example.com".to_string(),
//!     is_staff: true,
//!     is_subscription_staff: false,
//!     subscription_id: Some("sub-1".to_string()),
//! };
//! let issued = issuer.issue(&principal).unwrap();
//! let claims = issuer.verify(&issued.access_token).unwrap();
//! assert!(claims.is_admin);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, Principal};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::seconds(3600));
//! let hash = PasswordHasher::new().hash("password123").unwrap();
//! let principal = Principal {
//!     user_id: "user123".to_string(),
//!     email: "alice@example.com".to_string(),
//!     is_staff: false,
//!     is_subscription_staff: true,
//!     subscription_id: Some("sub-1".to_string()),
//! };
//!
//! let issued = auth.authenticate("password123", &hash, &principal).unwrap();
//! let claims = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(claims.user_id, "user123");
//! ```

pub mod access;
pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use access::AccessDecision;
pub use access::AccessGate;
pub use access::DenialReason;
pub use access::Principal;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AuthClaims;
pub use jwt::IssuedToken;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::LegacyHashCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordVerifier;
