//! Credential and token primitives for the authentication service.
//!
//! Two concerns live here, deliberately free of any storage or transport
//! dependencies so the service crate can wire them behind its own ports:
//! - Password hashing (Argon2id, PHC string format)
//! - Signed bearer tokens with typed claims (JWT, HS256)
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use authkit::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("hunter2").unwrap();
//! assert!(hasher.verify("hunter2", &hash).unwrap());
//! assert!(!hasher.verify("wrong", &hash).unwrap());
//! ```
//!
//! ## Signed tokens
//! ```
//! use authkit::{Claims, TokenCodec, TokenKind};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.sign(&Claims::new("alice", TokenKind::Access)).unwrap();
//!
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! assert_eq!(claims.kind, TokenKind::Access);
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
