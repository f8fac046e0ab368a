use chrono::Duration;

use crate::access::AccessDecision;
use crate::access::AccessGate;
use crate::access::DenialReason;
use crate::access::Principal;
use crate::jwt::AuthClaims;
use crate::jwt::IssuedToken;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordVerifier;

/// Login coordinator: password verification, then authorization, then
/// token issuance.
///
/// Immutable after construction and safe to share between threads.
pub struct Authenticator {
    password_verifier: PasswordVerifier,
    access_gate: AccessGate,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied: {0}")]
    AccessDenied(DenialReason),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_verifier(jwt_secret, token_ttl, PasswordVerifier::new())
    }

    /// Create an authenticator around a specific password verifier.
    pub fn with_verifier(
        jwt_secret: &[u8],
        token_ttl: Duration,
        password_verifier: PasswordVerifier,
    ) -> Self {
        Self {
            password_verifier,
            access_gate: AccessGate::new(),
            token_issuer: TokenIssuer::new(jwt_secret, token_ttl),
        }
    }

    /// Verify credentials, authorize the account and issue a token.
    ///
    /// This runs the key derivation and is CPU-bound; async callers should
    /// run it on a blocking thread.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `principal` - Account the credentials belong to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or hash is unusable
    /// * `AccessDenied` - Password matches but the account may not log in
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        principal: &Principal,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_verifier.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        if let AccessDecision::Denied(reason) = self.access_gate.authorize(principal) {
            return Err(AuthenticationError::AccessDenied(reason));
        }

        Ok(self.token_issuer.issue(principal)?)
    }

    /// Burn a comparable amount of work for a login attempt on an unknown
    /// account, then fail.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        self.password_verifier.verify_dummy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Bad structure or signature
    /// * `Expired` - Token has expired
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, TokenError> {
        self.token_issuer.verify(token)
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}
