use thiserror::Error;

use crate::domain::token::errors::TokenStoreError;
use crate::domain::user::errors::UserError;

/// Error for the credential-hashing capability.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Credential hashing failed: {0}")]
    HashingFailed(String),

    #[error("Credential verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for the signed-token capability.
///
/// `Expired` and `Invalid` are deliberately separate: a well-formed token
/// past its embedded expiry is a different outcome from one that fails
/// signature or structural validation.
#[derive(Debug, Clone, Error)]
pub enum IssuerError {
    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token verification failed: {0}")]
    Other(String),
}

/// Top-level error for token lifecycle operations.
///
/// Every operation resolves to exactly one success value or one of these
/// kinds; no kind is ever encoded in a formatted message string.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Email already registered: {0}")]
    UserAlreadyExists(String),

    /// Unknown email and wrong password collapse into this single kind so
    /// callers cannot enumerate registered emails.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    #[error("Token expired: {0}")]
    TokenExpired(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Infrastructure errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token issuance failed: {0}")]
    Issuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            // The store's uniqueness constraint is the source of truth; its
            // violation surfaces as the same kind as the pre-check.
            UserError::EmailAlreadyExists(email) => AuthError::UserAlreadyExists(email),
            UserError::NotFound(id) => AuthError::UserNotFound(id),
            other => AuthError::DatabaseError(other.to_string()),
        }
    }
}

impl From<TokenStoreError> for AuthError {
    fn from(err: TokenStoreError) -> Self {
        match err {
            TokenStoreError::DatabaseError(msg) => AuthError::DatabaseError(msg),
        }
    }
}
