//! Authentication infrastructure library.
//!
//! Provides the cryptographic building blocks the identity service
//! orchestrates:
//! - Password hashing and verification (Argon2id)
//! - Signed access-token issuance and validation (JWT, HS256)
//! - Opaque refresh-token string generation
//!
//! The service defines its own capability traits and adapts these
//! implementations behind them, so any conforming implementation can be
//! substituted without touching domain logic.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Signed Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("42", Duration::minutes(5));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "42");
//! ```

pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
