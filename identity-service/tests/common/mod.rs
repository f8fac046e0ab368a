#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::LegacyHashCodec;
use auth::PasswordHasher;
use auth::PasswordVerifier;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Duration;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::UserError;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Account store held in memory
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.users.iter().find(|u| u.email == *email).cloned())
    }
}

/// Account store that is never reachable
pub struct UnreachableUserRepository;

#[async_trait]
impl UserRepository for UnreachableUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserError> {
        Err(UserError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<User>, UserError> {
        Err(UserError::DatabaseError("connection refused".to_string()))
    }
}

/// Builder for test accounts
pub struct TestUser {
    user: User,
}

impl TestUser {
    /// Staff account with a subscription and a legacy PBKDF2 password hash
    pub fn legacy(email: &str, password: &str) -> Self {
        let password_hash = LegacyHashCodec::encode(password, "testsalt", 1_000, 32)
            .expect("Failed to encode legacy hash");
        Self::with_hash(email, password_hash)
    }

    /// Staff account with a subscription and an Argon2 password hash
    pub fn modern(email: &str, password: &str) -> Self {
        let password_hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");
        Self::with_hash(email, password_hash)
    }

    fn with_hash(email: &str, password_hash: String) -> Self {
        Self {
            user: User {
                id: UserId::new(),
                email: EmailAddress::new(email.to_string()).expect("Invalid test email"),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                password_hash,
                is_staff: true,
                is_subscription_staff: false,
                subscription_id: Some("sub-1".to_string()),
            },
        }
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.user.is_staff = is_staff;
        self
    }

    pub fn subscription_staff(mut self, is_subscription_staff: bool) -> Self {
        self.user.is_subscription_staff = is_subscription_staff;
        self
    }

    pub fn subscription(mut self, subscription_id: Option<&str>) -> Self {
        self.user.subscription_id = subscription_id.map(str::to_string);
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

/// Test application driving the router in-process
pub struct TestApp {
    pub router: Router,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub fn spawn(users: Vec<User>) -> Self {
        Self::with_repository(InMemoryUserRepository::new(users))
    }

    pub fn with_repository<R: UserRepository>(repository: R) -> Self {
        let authenticator = Arc::new(Authenticator::with_verifier(
            JWT_SECRET,
            Duration::seconds(TOKEN_TTL_SECONDS),
            PasswordVerifier::with_dummy_iterations(1_000),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::new(repository),
            Arc::clone(&authenticator),
        ));

        Self {
            router: create_router(user_service, Arc::clone(&authenticator)),
            authenticator,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "email": email, "password": password });
        self.login_with_body(&body.to_string()).await
    }

    pub async fn login_with_body(&self, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn me(&self, authorization: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(Method::GET).uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let request = builder
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response")
        };

        (status, body)
    }
}
