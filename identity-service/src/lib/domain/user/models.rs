use std::fmt;

use auth::IssuedToken;
use auth::Principal;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// User credential record.
///
/// Owned by the external account store; this service only reads it.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_subscription_staff: bool,
    pub subscription_id: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("is_staff", &self.is_staff)
            .field("is_subscription_staff", &self.is_subscription_staff)
            .field("subscription_id", &self.subscription_id)
            .finish_non_exhaustive()
    }
}

impl User {
    /// Projection handed to the authentication core.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id.to_string(),
            email: self.email.as_str().to_string(),
            is_staff: self.is_staff,
            is_subscription_staff: self.is_subscription_staff,
            subscription_id: self.subscription_id.clone(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
/// Stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        if email_address::EmailAddress::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::InvalidFormat(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login attempt received from the HTTP boundary.
///
/// The password is kept as received; it is never trimmed or logged.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: the signed token and the account it was issued to.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: IssuedToken,
}
