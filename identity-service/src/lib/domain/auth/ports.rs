use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::CredentialError;
use crate::domain::auth::errors::IssuerError;
use crate::domain::auth::models::AccessTokenClaims;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::models::UserId;

/// Port for token lifecycle operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new principal and issue a fresh token pair.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered; nothing created
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Authenticate by email and password and issue a fresh token pair.
    ///
    /// Logins are additive: no prior refresh token is revoked.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, not
    ///   distinguished
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Mint a new access token against a stored refresh token.
    ///
    /// The refresh token itself is not rotated or replaced.
    ///
    /// # Errors
    /// * `TokenInvalid` - Token absent or revoked
    /// * `TokenExpired` - Token strictly past its expiry
    /// * `UserNotFound` - Owning user no longer exists
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Revoke a refresh token. Idempotent: revoking an already-revoked
    /// token succeeds.
    ///
    /// # Errors
    /// * `TokenInvalid` - Token absent
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Well-formed but past its embedded expiry
    /// * `TokenInvalid` - Fails signature or structural validation
    /// * `Unauthorized` - Any other verification-path failure
    async fn verify_access_token(&self, access_token: &str)
        -> Result<AccessTokenClaims, AuthError>;
}

/// Capability: one-way credential hashing and verification.
///
/// Defined as a trait so any conforming implementation (platform crypto
/// library, HSM-backed) can be substituted without touching the engine.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a secret for storage.
    fn hash(&self, secret: &str) -> Result<String, CredentialError>;

    /// Verify a secret against a stored hash. `Ok(false)` means mismatch.
    fn verify(&self, secret: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Capability: mint and verify short-lived signed credentials.
///
/// The issuer embeds its own expiry when signing; the engine never inspects
/// a signed token directly.
pub trait AccessTokenIssuer: Send + Sync + 'static {
    /// Sign a credential whose subject is the given user id.
    fn sign(&self, user_id: &UserId) -> Result<String, IssuerError>;

    /// Verify a signed credential, reporting expiry, invalidity, and other
    /// failures distinctly.
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, IssuerError>;
}
