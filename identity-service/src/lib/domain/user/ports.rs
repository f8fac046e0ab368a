use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Raw email and password from the caller
    ///
    /// # Returns
    /// Signed token and the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, malformed email or wrong password
    /// * `AccessDenied` - Password matches but the account may not log in
    /// * `DatabaseError` - User lookup failed
    /// * `Unknown` - Verification task or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Read access to the account store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
