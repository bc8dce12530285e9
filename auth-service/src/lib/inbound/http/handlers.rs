use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::credential::errors::AuthError;
use crate::credential::errors::IdentityError;
use crate::credential::errors::PasswordInputError;
use crate::credential::models::Identity;
use crate::credential::models::Password;

pub mod signin;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::CredentialsIncorrect | AuthError::CredentialsTaken => {
                ApiError::Forbidden(err.to_string())
            }
            AuthError::MalformedHash(_)
            | AuthError::SigningUnavailable(_)
            | AuthError::TokenIssuanceFailed(_)
            | AuthError::HashingFailed(_)
            | AuthError::Store(_) => {
                tracing::error!(error = %err, "Authentication request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message,
        }
    }
}

/// HTTP request body shared by signup and signin (raw JSON).
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
pub enum ParseAuthRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] IdentityError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordInputError),
}

impl AuthRequestBody {
    fn try_into_parts(self) -> Result<(Identity, Password), ParseAuthRequestError> {
        let identity = Identity::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok((identity, password))
    }
}

impl From<ParseAuthRequestError> for ApiError {
    fn from(err: ParseAuthRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
