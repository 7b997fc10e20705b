use async_trait::async_trait;

use crate::domain::token::errors::TokenStoreError;
use crate::domain::token::models::NewRefreshToken;
use crate::domain::token::models::RefreshToken;
use crate::domain::user::models::UserId;

/// Persistence operations for refresh-token records.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh token, assigning id and creation timestamp.
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken, TokenStoreError>;

    /// Retrieve a token by its exact opaque value (`None` if not found).
    async fn find_by_value(&self, value: &str) -> Result<Option<RefreshToken>, TokenStoreError>;

    /// Mark a token revoked. Returns whether a record matched; revoking an
    /// already-revoked token matches and succeeds.
    async fn revoke(&self, value: &str) -> Result<bool, TokenStoreError>;

    /// Delete every token owned by a user, returning the removed count.
    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, TokenStoreError>;
}
