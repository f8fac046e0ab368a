use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_USER: &str = r#"
    SELECT id, email, first_name, last_name, password_hash,
           is_staff, is_subscription_staff, subscription_id
    FROM users
"#;

/// Read-only adapter over the `users` table owned by the account store.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    is_staff: bool,
    is_subscription_staff: bool,
    subscription_id: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password_hash,
            is_staff: row.is_staff,
            is_subscription_staff: row.is_subscription_staff,
            subscription_id: row.subscription_id,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE lower(email) = $1"))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
