use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::IssuerError;
use crate::domain::auth::models::AccessTokenClaims;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AccessTokenIssuer;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::token::models::NewRefreshToken;
use crate::domain::token::ports::RefreshTokenRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Token lifecycle engine.
///
/// Stateless orchestrator over the user and refresh-token stores and the
/// two opaque crypto capabilities. All long-lived state belongs to the
/// stores; concurrent calls are not ordered or mutually excluded here.
pub struct AuthService<UR, TR, CH, TI>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    CH: CredentialHasher,
    TI: AccessTokenIssuer,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    hasher: Arc<CH>,
    issuer: Arc<TI>,
    refresh_ttl: Duration,
}

impl<UR, TR, CH, TI> AuthService<UR, TR, CH, TI>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    CH: CredentialHasher,
    TI: AccessTokenIssuer,
{
    /// Create the engine with injected stores and capabilities.
    ///
    /// `refresh_ttl` is the absolute lifetime of every refresh token issued
    /// by this instance (7 days in the default configuration).
    pub fn new(
        users: Arc<UR>,
        tokens: Arc<TR>,
        hasher: Arc<CH>,
        issuer: Arc<TI>,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            issuer,
            refresh_ttl,
        }
    }

    /// Issue a fresh access/refresh pair for a user.
    ///
    /// The refresh value is an opaque random string persisted alongside its
    /// expiry; the raw value is returned to the caller exactly once.
    async fn issue_token_pair(&self, user_id: &UserId) -> Result<TokenPair, AuthError> {
        let access_token = self
            .issuer
            .sign(user_id)
            .map_err(|e| AuthError::Issuance(e.to_string()))?;

        let refresh_token = auth::refresh::generate_token();
        let expires_at = Utc::now() + self.refresh_ttl;

        self.tokens
            .create(NewRefreshToken {
                token: refresh_token.clone(),
                user_id: *user_id,
                expires_at,
            })
            .await?;

        tracing::debug!(user_id = %user_id, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl<UR, TR, CH, TI> AuthServicePort for AuthService<UR, TR, CH, TI>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    CH: CredentialHasher,
    TI: AccessTokenIssuer,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        // Fast-reject path; the store's uniqueness constraint remains the
        // source of truth under concurrent registration.
        if let Some(existing) = self.users.find_by_email(command.email.as_str()).await? {
            return Err(AuthError::UserAlreadyExists(
                existing.email.as_str().to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&command.password)?;

        let user = self
            .users
            .create(NewUser {
                email: command.email,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        let tokens = self.issue_token_pair(&user.id).await?;
        Ok(AuthSession::new(user, tokens))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        // Unknown email and wrong password take the same exit so the two
        // cases are externally indistinguishable.
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_token_pair(&user.id).await?;
        Ok(AuthSession::new(user, tokens))
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let token = self
            .tokens
            .find_by_value(refresh_token)
            .await?
            .ok_or_else(|| AuthError::TokenInvalid("Refresh token not found".to_string()))?;

        // Revocation is terminal and checked before expiry.
        if token.is_revoked {
            return Err(AuthError::TokenInvalid(
                "Refresh token revoked".to_string(),
            ));
        }

        if token.is_expired(Utc::now()) {
            return Err(AuthError::TokenExpired(
                "Refresh token expired".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(&token.user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(token.user_id.to_string()))?;

        // The refresh token is not rotated on this path.
        self.issuer
            .sign(&user.id)
            .map_err(|e| AuthError::Issuance(e.to_string()))
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let revoked = self.tokens.revoke(refresh_token).await?;

        if !revoked {
            return Err(AuthError::TokenInvalid(
                "Refresh token not found".to_string(),
            ));
        }

        Ok(())
    }

    async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<AccessTokenClaims, AuthError> {
        self.issuer.verify(access_token).map_err(|e| match e {
            IssuerError::Expired => AuthError::TokenExpired("Access token expired".to_string()),
            IssuerError::Invalid(msg) => AuthError::TokenInvalid(msg),
            IssuerError::SigningFailed(msg) | IssuerError::Other(msg) => {
                AuthError::Unauthorized(msg)
            }
        })
    }
}
