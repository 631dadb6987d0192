use std::sync::Arc;

use authkit::TokenKind;
use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login(
    service: Arc<dyn AuthServicePort>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    service
        .validate_credentials(&request.username, &request.password)
        .await
        .map_err(|_| Status::unauthenticated("invalid credentials"))?;

    let access_token = service
        .generate_token(&request.username, TokenKind::Access)
        .await
        .map_err(|_| Status::internal("failed to generate access token"))?;
    let refresh_token = service
        .generate_token(&request.username, TokenKind::Refresh)
        .await
        .map_err(|_| Status::internal("failed to generate refresh token"))?;

    Ok(LoginResponse {
        message: "Login successful".to_string(),
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    })
}
