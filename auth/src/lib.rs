//! Credential primitives for the auth service
//!
//! Provides the building blocks the service wires together:
//! - Password hashing (Argon2id, PHC strings)
//! - JWT access token issuance and verification
//!
//! The service defines its own ports and adapts these implementations to them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::Argon2Hasher;
//!
//! let hasher = Argon2Hasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").unwrap());
//! assert!(!hasher.verify(&hash, "not_my_password").unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = issuer.issue(42, "alice@example.com").unwrap();
//!
//! let claims = issuer.verify(&token.access_token).unwrap();
//! assert_eq!(claims.sub, "42");
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use password::Argon2Hasher;
pub use password::PasswordError;
