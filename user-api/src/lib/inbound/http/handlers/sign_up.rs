use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::SignupInput;
use crate::domain::user::models::UserProfile;
use crate::inbound::http::router::AppState;

pub const SIGN_UP_MESSAGE: &str = "User created successfully";

/// `POST /api/auth/sign-up`
///
/// A body that is not valid JSON for [`SignUpRequest`] is handed to the
/// service as an absent payload.
pub async fn sign_up(
    State(state): State<AppState>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignUpResponseData>, ApiError> {
    let input = match body {
        Ok(Json(request)) => Some(SignupInput::from(request)),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected signup payload");
            None
        }
    };

    state
        .user_service
        .sign_up(input)
        .await
        .map_err(|e| {
            if !e.is_client_error() {
                tracing::error!(error = %e, "Signup failed");
            }
            ApiError::from_user_error(e, state.expose_error_details)
        })
        .map(|profile| ApiSuccess::new(StatusCode::CREATED, SIGN_UP_MESSAGE, profile.into()))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    username: String,
    email: String,
    password: Option<String>,
}

impl From<SignUpRequest> for SignupInput {
    fn from(request: SignUpRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub user_type: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for SignUpResponseData {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            user_type: profile.user_type.as_str().to_string(),
            access_token: profile.token_access,
            refresh_token: profile.token_refresh,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
