use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// The two token kinds this service mints.
///
/// The kind is fixed at issuance: refresh only consumes `Refresh` tokens
/// and only produces `Access` tokens. Serialized on the wire as the
/// `type` claim with values `"access"` / `"refresh"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Issuance lifetime for this kind. Policy constants, not configurable.
    pub fn ttl(self) -> Duration {
        match self {
            TokenKind::Access => Duration::hours(1),
            TokenKind::Refresh => Duration::days(30),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(TokenError::InvalidKind(other.to_string())),
        }
    }
}

/// Typed claim set carried inside a signed token.
///
/// A fixed structure instead of a free-form claim map: `sub`, `exp` and
/// `type` are always present and statically typed, while the flattened
/// `extra` map is the extension point for additional claims without a
/// wire format break.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject, the username the token was issued to.
    pub sub: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp). Optional so tokens minted by older
    /// deployments still verify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Token kind, serialized as the `type` claim.
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Additional custom claims (flattened into the token).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Claims for a freshly issued token: `exp` is now plus the kind's TTL.
    pub fn new(subject: impl ToString, kind: TokenKind) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            exp: (now + kind.ttl()).timestamp(),
            iat: Some(now.timestamp()),
            kind,
            extra: HashMap::new(),
        }
    }

    /// Override the expiration timestamp.
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Add a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("access".parse::<TokenKind>().unwrap(), TokenKind::Access);
        assert_eq!("refresh".parse::<TokenKind>().unwrap(), TokenKind::Refresh);

        let err = "bogus-kind".parse::<TokenKind>().unwrap_err();
        assert!(matches!(err, TokenError::InvalidKind(_)));
    }

    #[test]
    fn test_kind_ttl() {
        assert_eq!(TokenKind::Access.ttl(), Duration::hours(1));
        assert_eq!(TokenKind::Refresh.ttl(), Duration::days(30));
    }

    #[test]
    fn test_new_claims_expiration() {
        let claims = Claims::new("admin", TokenKind::Access);
        assert_eq!(claims.exp - claims.iat.unwrap(), 60 * 60);

        let claims = Claims::new("admin", TokenKind::Refresh);
        assert_eq!(claims.exp - claims.iat.unwrap(), 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_wire_format() {
        let claims = Claims::new("alice", TokenKind::Refresh).with_extra("jti", "abc-123");
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["sub"], "alice");
        assert_eq!(value["type"], "refresh");
        assert_eq!(value["jti"], "abc-123");
        assert!(value["exp"].is_i64());
    }

    #[test]
    fn test_decodes_without_iat() {
        // Tokens from the previous deployment carry only sub/exp/type.
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"admin","exp":1700000000,"type":"access"}"#).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.iat.is_none());
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("admin", TokenKind::Access).with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }
}
