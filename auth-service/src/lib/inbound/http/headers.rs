use axum::http::header;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::handlers::ApiError;

/// Extract a username/password pair from a Basic Authorization header.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let encoded = auth_header(headers)?
        .strip_prefix("Basic ")
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Basic <credentials>".to_string(),
            )
        })?;

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| ApiError::Unauthorized("Invalid Basic credentials".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| ApiError::Unauthorized("Invalid Basic credentials".to_string()))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::Unauthorized("Invalid Basic credentials".to_string()))?;

    Ok((username.to_string(), password.to_string()))
}

/// Extract the token from a Bearer Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    auth_header(headers)?.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}

fn auth_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_credentials() {
        // base64("admin:admin123")
        let headers = headers("Basic YWRtaW46YWRtaW4xMjM=");
        let (username, password) = basic_credentials(&headers).unwrap();
        assert_eq!(username, "admin");
        assert_eq!(password, "admin123");
    }

    #[test]
    fn test_basic_credentials_missing_header() {
        let result = basic_credentials(&HeaderMap::new());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_basic_credentials_wrong_scheme() {
        let result = basic_credentials(&headers("Bearer sometoken"));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_basic_credentials_no_colon() {
        // base64("admin") with no password separator
        let result = basic_credentials(&headers("Basic YWRtaW4="));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_bearer_token() {
        let headers = headers("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let headers = headers("Basic YWRtaW46YWRtaW4xMjM=");
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
