use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::AuthClaims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use crate::access::Principal;

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: AuthClaims,
}

/// Issues and verifies stateless authentication tokens.
///
/// Validity is a function of the HMAC signature and the expiry claim only;
/// there is no revocation list.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Sign a token for `principal`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token could not be signed
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        self.issue_at(principal, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = AuthClaims::for_principal(principal, issued_at, self.ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Bad structure or signature
    /// * `Expired` - Signature is valid but the token has expired
    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit instant.
    ///
    /// The signature is checked before expiry, so a forged token is always
    /// reported as `Malformed` even when its claimed expiry has passed.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthClaims, TokenError> {
        let claims: AuthClaims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
