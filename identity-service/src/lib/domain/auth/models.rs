use crate::domain::user::errors::UserIdError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Command to register a new principal.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// A freshly issued access/refresh credential pair.
///
/// The refresh value appears here exactly once; it is never logged and the
/// store keeps it only as the lookup key.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthSession {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

/// Claims extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Subject: the owning user id in string form.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl AccessTokenClaims {
    /// Parse the subject claim back into a user id.
    ///
    /// # Errors
    /// * `InvalidFormat` - Subject is not a numeric id
    pub fn user_id(&self) -> Result<UserId, UserIdError> {
        UserId::from_string(&self.sub)
    }
}
