use std::time::Duration;

use async_trait::async_trait;
use authkit::TokenKind;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::CreateUserCommand;
use crate::domain::auth::models::User;

/// Port for the authentication engine.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check a username/password pair against the stored hash.
    ///
    /// Lookup failures and mismatches are indistinguishable to the caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, store failure, or wrong password
    async fn validate_credentials(&self, username: &str, password: &str)
        -> Result<(), AuthError>;

    /// Mint a signed token of the given kind for a username.
    ///
    /// Expiry is now plus the kind's TTL (1 hour for access, 30 days for
    /// refresh).
    ///
    /// # Errors
    /// * `TokenSigningFailed` - Claims could not be signed
    async fn generate_token(&self, username: &str, kind: TokenKind) -> Result<String, AuthError>;

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The supplied refresh token stays valid until its natural expiry;
    /// there is no revocation store, so it may be exchanged again.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, bad signature, or missing subject
    /// * `ExpiredToken` - Signature is valid but the token has expired
    /// * `InvalidTokenType` - Token is not a refresh token
    /// * `TokenSigningFailed` - New access token could not be signed
    async fn refresh_token(&self, token: &str) -> Result<String, AuthError>;

    /// Register a new user with a hashed password.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username is already taken
    /// * `StoreError` - Store operation failed
    /// * `Unknown` - Password hashing failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, AuthError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Look up a user by username.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    /// * `StoreError` - Store operation failed
    async fn get(&self, username: &str) -> Result<User, AuthError>;

    /// Persist a new user.
    ///
    /// Implementations must guarantee that concurrent inserts of the same
    /// username admit at most one winner; the rest observe
    /// `UserAlreadyExists`.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username is already taken
    /// * `StoreError` - Store operation failed
    async fn insert(&self, user: User) -> Result<User, AuthError>;
}

/// Observation hooks for the engine.
///
/// Purely observational; implementations must never fail and their absence
/// (the no-op recorder) does not affect correctness.
pub trait AuthMetrics: Send + Sync + 'static {
    /// A credential check finished.
    fn login_attempt(&self, success: bool);

    /// Wall-clock duration of a credential check.
    fn login_duration(&self, duration: Duration);

    /// A token was minted.
    fn token_generated(&self, kind: TokenKind);

    /// A token passed through refresh verification.
    /// Outcome is one of `valid`, `invalid`, `invalid_type`.
    fn token_validated(&self, outcome: &'static str);

    /// A registration attempt finished.
    /// Outcome is one of `success`, `conflict`, `failure`.
    fn user_created(&self, outcome: &'static str);

    /// Wall-clock duration of a successful registration.
    fn user_creation_duration(&self, duration: Duration);
}
