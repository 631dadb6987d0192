use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::VerifyTokenRequest;
use crate::proto::VerifyTokenResponse;

/// Verify is defined as "attempt a refresh": a token is valid exactly when
/// the engine can exchange it, and the caller receives the refreshed
/// access token. There is no separate non-mutating verification path.
pub async fn verify_token(
    service: Arc<dyn AuthServicePort>,
    request: VerifyTokenRequest,
) -> Result<VerifyTokenResponse, Status> {
    if request.token.is_empty() {
        return Ok(invalid());
    }

    let new_access_token = match service.refresh_token(&request.token).await {
        Ok(token) => token,
        Err(_) => return Ok(invalid()),
    };

    if new_access_token != request.token {
        return Ok(VerifyTokenResponse {
            message: "Token refreshed".to_string(),
            valid: true,
            access_token: new_access_token,
            token_type: "Bearer".to_string(),
        });
    }

    Ok(VerifyTokenResponse {
        message: "Token is valid".to_string(),
        valid: true,
        access_token: String::new(),
        token_type: String::new(),
    })
}

fn invalid() -> VerifyTokenResponse {
    VerifyTokenResponse {
        message: "Token is invalid".to_string(),
        valid: false,
        access_token: String::new(),
        token_type: String::new(),
    }
}
