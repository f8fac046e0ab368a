use auth::AuthClaims;
use auth::Authenticator;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::handlers::ApiErrorBody;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: AuthClaims,
}

/// Why a protected request was turned away.
///
/// Expired and forged tokens share one response; only the logs differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingToken,
    MalformedHeader,
    InvalidToken,
    ExpiredToken,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MissingToken | Rejection::MalformedHeader => StatusCode::UNAUTHORIZED,
            Rejection::InvalidToken | Rejection::ExpiredToken => StatusCode::FORBIDDEN,
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            Rejection::MissingToken => "Authentication credentials were not provided.",
            Rejection::MalformedHeader => {
                "Invalid Authorization header format. Expected: Bearer <token>"
            }
            Rejection::InvalidToken | Rejection::ExpiredToken => "Invalid or expired token.",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ApiErrorBody {
                detail: self.detail().to_string(),
            }),
        )
            .into_response()
    }
}

/// Resolve the caller of a request from its `Authorization` header.
///
/// # Errors
/// * `MissingToken` - No Authorization header
/// * `MalformedHeader` - Header is not `Bearer <token>`
/// * `InvalidToken` - Bad signature, bad structure or unusable subject
/// * `ExpiredToken` - Signature is valid but the token has expired
pub fn authenticate_request(
    authenticator: &Authenticator,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, Rejection> {
    let token = extract_bearer_token(headers)?;

    let claims = authenticator.validate_token(token).map_err(|e| match e {
        TokenError::Expired => {
            tracing::debug!("Rejected expired token");
            Rejection::ExpiredToken
        }
        other => {
            tracing::warn!(error = %other, "Rejected invalid token");
            Rejection::InvalidToken
        }
    })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user ID");
        Rejection::InvalidToken
    })?;

    Ok(AuthenticatedUser { user_id, claims })
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Rejection> {
    let caller = authenticate_request(&state.authenticator, req.headers())?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, Rejection> {
    let auth_header = headers.get(AUTHORIZATION).ok_or(Rejection::MissingToken)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| Rejection::MalformedHeader)?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(Rejection::MalformedHeader),
    }
}
