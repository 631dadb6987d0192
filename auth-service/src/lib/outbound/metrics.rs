use std::time::Duration;

use authkit::TokenKind;

use crate::domain::auth::ports::AuthMetrics;

/// Metrics recorder that emits structured tracing events.
///
/// Counters and observations are published as events under the
/// `auth_service::metrics` target, where a subscriber layer (or log
/// scraper) can aggregate them. Swap in a real metrics backend by
/// implementing `AuthMetrics` against it.
pub struct TracingMetrics;

impl AuthMetrics for TracingMetrics {
    fn login_attempt(&self, success: bool) {
        tracing::debug!(
            target: "auth_service::metrics",
            counter = "login_attempts_total",
            success,
            "login attempt"
        );
    }

    fn login_duration(&self, duration: Duration) {
        tracing::debug!(
            target: "auth_service::metrics",
            histogram = "login_duration_seconds",
            duration_ms = duration.as_millis() as u64,
            "login duration"
        );
    }

    fn token_generated(&self, kind: TokenKind) {
        tracing::debug!(
            target: "auth_service::metrics",
            counter = "tokens_generated_total",
            kind = %kind,
            "token generated"
        );
    }

    fn token_validated(&self, outcome: &'static str) {
        tracing::debug!(
            target: "auth_service::metrics",
            counter = "tokens_validated_total",
            outcome,
            "token validated"
        );
    }

    fn user_created(&self, outcome: &'static str) {
        tracing::debug!(
            target: "auth_service::metrics",
            counter = "users_created_total",
            outcome,
            "user creation"
        );
    }

    fn user_creation_duration(&self, duration: Duration) {
        tracing::debug!(
            target: "auth_service::metrics",
            histogram = "user_creation_duration_seconds",
            duration_ms = duration.as_millis() as u64,
            "user creation duration"
        );
    }
}

/// Recorder that drops every observation. For tests and for deployments
/// that do not collect metrics.
pub struct NoOpMetrics;

impl AuthMetrics for NoOpMetrics {
    fn login_attempt(&self, _success: bool) {}
    fn login_duration(&self, _duration: Duration) {}
    fn token_generated(&self, _kind: TokenKind) {}
    fn token_validated(&self, _outcome: &'static str) {}
    fn user_created(&self, _outcome: &'static str) {}
    fn user_creation_duration(&self, _duration: Duration) {}
}
