use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use authkit::TokenKind;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::headers::basic_credentials;
use crate::inbound::http::router::AppState;

/// Authenticate with a Basic Authorization header and receive a token
/// pair.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let (username, password) = basic_credentials(&headers)?;

    state
        .auth_service
        .validate_credentials(&username, &password)
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let access_token = state
        .auth_service
        .generate_token(&username, TokenKind::Access)
        .await
        .map_err(ApiError::from)?;
    let refresh_token = state
        .auth_service
        .generate_token(&username, TokenKind::Refresh)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            message: "Login successful".to_string(),
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}
