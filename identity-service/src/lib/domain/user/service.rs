use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Read access to the account store
    /// * `authenticator` - Password verification, authorization and token issuance
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_login_candidate(&self, email: String) -> Result<Option<User>, UserError> {
        match EmailAddress::new(email) {
            Ok(email) => self.repository.find_by_email(&email).await,
            Err(_) => Ok(None),
        }
    }
}

fn verification_task_failed(err: tokio::task::JoinError) -> UserError {
    UserError::Unknown(format!("Password verification task failed: {}", err))
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let LoginCommand { email, password } = command;
        let authenticator = Arc::clone(&self.authenticator);

        let Some(user) = self.find_login_candidate(email).await? else {
            // Keep the unknown-account path as slow as a wrong password
            tokio::task::spawn_blocking(move || authenticator.reject_unknown_user(&password))
                .await
                .map_err(verification_task_failed)?;

            tracing::warn!("Login rejected: no matching account");
            return Err(UserError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let principal = user.principal();

        // Key derivation is CPU-bound; if the request goes away the task
        // finishes and its result is dropped.
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &principal)
        })
        .await
        .map_err(verification_task_failed)?;

        match result {
            Ok(token) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(LoginOutcome { user, token })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::AccessDenied(reason)) => {
                tracing::warn!(user_id = %user.id, reason = %reason, "Login rejected: access denied");
                Err(UserError::AccessDenied)
            }
            Err(AuthenticationError::Token(e)) => {
                tracing::error!(user_id = %user.id, error = %e, "Token generation failed");
                Err(UserError::Unknown(format!("Token generation failed: {}", e)))
            }
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
