use auth::AccessToken;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::AuthRequestBody;
use crate::credential::models::SignupCommand;
use crate::credential::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<AuthRequestBody>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    let (identity, password) = body.try_into_parts()?;

    state
        .auth_service
        .signup(SignupCommand::new(identity, password))
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::CREATED, token))
}
