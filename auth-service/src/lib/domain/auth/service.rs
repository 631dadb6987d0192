use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use authkit::Claims;
use authkit::PasswordHasher;
use authkit::TokenCodec;
use authkit::TokenError;
use authkit::TokenKind;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::CreateUserCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthMetrics;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserStore;

/// The authentication engine.
///
/// Stateless pipeline over the credential store, the password hasher, and
/// the token codec. The signing secret is injected once at construction;
/// after that every call is independent, so unlimited concurrent
/// invocations are safe and two simultaneous issuances for the same user
/// both succeed with distinct tokens.
pub struct AuthService<S, M>
where
    S: UserStore,
    M: AuthMetrics,
{
    store: Arc<S>,
    metrics: Arc<M>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl<S, M> AuthService<S, M>
where
    S: UserStore,
    M: AuthMetrics,
{
    /// Create the engine with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `metrics` - Metrics recorder (use the no-op recorder to disable)
    /// * `jwt_secret` - Process-wide signing secret
    pub fn new(store: Arc<S>, metrics: Arc<M>, jwt_secret: &[u8]) -> Self {
        Self {
            store,
            metrics,
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret),
        }
    }

    async fn check_credentials(&self, username: &str, password: &str) -> Result<(), AuthError> {
        // Store errors, unknown users, unparseable hashes, and mismatches
        // all flatten to InvalidCredentials so the caller cannot probe for
        // registered usernames.
        let user = self.store.get(username).await.map_err(|e| {
            tracing::debug!(username, error = %e, "credential lookup failed");
            AuthError::InvalidCredentials
        })?;

        let matches = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| {
                tracing::debug!(username, error = %e, "stored hash did not parse");
                AuthError::InvalidCredentials
            })?;

        if matches {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[async_trait]
impl<S, M> AuthServicePort for AuthService<S, M>
where
    S: UserStore,
    M: AuthMetrics,
{
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let start = Instant::now();

        let result = self.check_credentials(username, password).await;

        self.metrics.login_attempt(result.is_ok());
        self.metrics.login_duration(start.elapsed());
        result
    }

    async fn generate_token(&self, username: &str, kind: TokenKind) -> Result<String, AuthError> {
        // The jti claim makes simultaneous issuances for the same subject
        // produce distinct token strings.
        let claims = Claims::new(username, kind).with_extra("jti", Uuid::new_v4().to_string());

        let token = self
            .token_codec
            .sign(&claims)
            .map_err(|e| AuthError::TokenSigningFailed(e.to_string()))?;

        self.metrics.token_generated(kind);
        Ok(token)
    }

    async fn refresh_token(&self, token: &str) -> Result<String, AuthError> {
        let claims = match self.token_codec.verify(token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                self.metrics.token_validated("invalid");
                return Err(AuthError::ExpiredToken);
            }
            Err(e) => {
                tracing::debug!(error = %e, "refresh token rejected");
                self.metrics.token_validated("invalid");
                return Err(AuthError::InvalidToken);
            }
        };

        // Refresh is the only exchange point; an access token must never
        // mint further tokens.
        if claims.kind != TokenKind::Refresh {
            self.metrics.token_validated("invalid_type");
            return Err(AuthError::InvalidTokenType);
        }

        if claims.sub.is_empty() {
            self.metrics.token_validated("invalid");
            return Err(AuthError::InvalidToken);
        }

        self.metrics.token_validated("valid");
        self.generate_token(&claims.sub, TokenKind::Access).await
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, AuthError> {
        let start = Instant::now();

        match self.store.get(command.username.as_str()).await {
            Ok(_) => {
                self.metrics.user_created("conflict");
                return Err(AuthError::UserAlreadyExists(command.username.to_string()));
            }
            Err(AuthError::UserNotFound(_)) => {}
            Err(e) => {
                self.metrics.user_created("failure");
                return Err(e);
            }
        }

        let password_hash = self.password_hasher.hash(&command.password).map_err(|e| {
            self.metrics.user_created("failure");
            AuthError::Unknown(format!("Password hashing failed: {}", e))
        })?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        // The check above is advisory only; the store's insert is the
        // authoritative uniqueness point under concurrency.
        match self.store.insert(user).await {
            Ok(user) => {
                self.metrics.user_created("success");
                self.metrics.user_creation_duration(start.elapsed());
                tracing::info!(username = %user.username, "user created");
                Ok(user)
            }
            Err(e @ AuthError::UserAlreadyExists(_)) => {
                self.metrics.user_created("conflict");
                Err(e)
            }
            Err(e) => {
                self.metrics.user_created("failure");
                Err(e)
            }
        }
    }
}
