use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .login(LoginCommand::new(body.email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: LoginUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserData {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            token: outcome.token.access_token.clone(),
            user: LoginUserData {
                id: outcome.user.id.to_string(),
                email: outcome.user.email.as_str().to_string(),
                is_admin: outcome.token.claims.is_admin,
            },
        }
    }
}
