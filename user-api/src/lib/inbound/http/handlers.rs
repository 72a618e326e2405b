use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::ErrorKind;
use crate::user::errors::UserError;

pub mod sign_up;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error reply: a status, a message safe for clients, and an optional
/// internal detail that is only rendered outside production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn too_many_requests() -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, "too many requests")
    }

    /// Map a domain error to a reply.
    ///
    /// # Arguments
    /// * `err` - Domain error
    /// * `expose_details` - Attach `err`'s full text as the envelope `error`
    pub fn from_user_error(err: UserError, expose_details: bool) -> Self {
        let api_error = match err.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => Self::bad_request(err.to_string()),
            ErrorKind::Token => Self::new(StatusCode::UNAUTHORIZED, err.to_string()),
            ErrorKind::Credential => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to process password")
            }
            ErrorKind::Store => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to create user"),
        };

        if expose_details {
            api_error.with_detail(err.to_string())
        } else {
            api_error
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponseBody::<()>::new_error(self.status, self.message, self.detail);
        (self.status, Json(body)).into_response()
    }
}

/// Envelope shared by every reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            status: status.as_u16(),
            data: Some(data),
            error: None,
        }
    }

    pub fn new_error(status: StatusCode, message: String, detail: Option<String>) -> Self {
        Self {
            success: false,
            message,
            status: status.as_u16(),
            data: None,
            error: detail,
        }
    }
}
