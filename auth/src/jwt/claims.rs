use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::access::Principal;

/// Claims carried by an authentication token.
///
/// `is_admin` is captured from the account's staff flag at issuance and is
/// not re-derived while the token lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthClaims {
    /// Subject (user identifier)
    #[serde(rename = "sub")]
    pub user_id: String,

    pub email: String,

    #[serde(rename = "isAdmin")]
    pub is_admin: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AuthClaims {
    /// Build claims for a verified principal.
    ///
    /// # Arguments
    /// * `principal` - Account the token is issued to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn for_principal(principal: &Principal, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id: principal.user_id.clone(),
            email: principal.email.clone(),
            is_admin: principal.is_staff,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is no longer valid from its expiration second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
