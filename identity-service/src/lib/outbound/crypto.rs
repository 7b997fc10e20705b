use auth::jwt::Claims;
use auth::jwt::JwtError;
use auth::jwt::JwtHandler;
use auth::password::PasswordError;
use auth::password::PasswordHasher;
use chrono::Duration;

use crate::domain::auth::errors::CredentialError;
use crate::domain::auth::errors::IssuerError;
use crate::domain::auth::models::AccessTokenClaims;
use crate::domain::auth::ports::AccessTokenIssuer;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::user::models::UserId;

/// Argon2id-backed credential hasher.
pub struct Argon2CredentialHasher {
    hasher: PasswordHasher,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self {
            hasher: PasswordHasher::new(),
        }
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        self.hasher.hash(secret).map_err(|e| match e {
            PasswordError::HashingFailed(msg) => CredentialError::HashingFailed(msg),
            PasswordError::VerificationFailed(msg) => CredentialError::VerificationFailed(msg),
        })
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, CredentialError> {
        self.hasher.verify(secret, hash).map_err(|e| match e {
            PasswordError::HashingFailed(msg) => CredentialError::HashingFailed(msg),
            PasswordError::VerificationFailed(msg) => CredentialError::VerificationFailed(msg),
        })
    }
}

/// HS256-signed access token issuer with a fixed lifetime.
pub struct JwtAccessTokenIssuer {
    handler: JwtHandler,
    lifetime: Duration,
}

impl JwtAccessTokenIssuer {
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetime,
        }
    }
}

impl AccessTokenIssuer for JwtAccessTokenIssuer {
    fn sign(&self, user_id: &UserId) -> Result<String, IssuerError> {
        let claims = Claims::for_subject(user_id, self.lifetime);

        self.handler
            .encode(&claims)
            .map_err(|e| IssuerError::SigningFailed(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccessTokenClaims, IssuerError> {
        let claims = self.handler.decode(token).map_err(|e| match e {
            JwtError::TokenExpired => IssuerError::Expired,
            JwtError::InvalidToken(msg) => IssuerError::Invalid(msg),
            JwtError::EncodingFailed(msg) | JwtError::VerificationFailed(msg) => {
                IssuerError::Other(msg)
            }
        })?;

        Ok(AccessTokenClaims {
            sub: claims.sub,
            exp: claims.exp,
            iat: claims.iat,
        })
    }
}
