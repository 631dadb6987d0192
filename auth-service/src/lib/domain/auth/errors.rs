use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Top-level error for all authentication operations.
///
/// The engine always returns one of these; transport adapters own the
/// mapping to statuses and decide which kinds are safe to reveal.
/// Credential failures are deliberately flattened to `InvalidCredentials`
/// so callers cannot distinguish an unknown username from a wrong
/// password.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid token type")]
    InvalidTokenType,

    #[error("Token signing failed: {0}")]
    TokenSigningFailed(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
