use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::token::errors::TokenStoreError;
use crate::domain::token::models::NewRefreshToken;
use crate::domain::token::models::RefreshToken;
use crate::domain::token::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RefreshTokenRow {
    id: i64,
    token: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    is_revoked: bool,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        Self {
            id: row.id,
            token: row.token,
            user_id: UserId(row.user_id),
            expires_at: row.expires_at,
            is_revoked: row.is_revoked,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken, TokenStoreError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, token, user_id, expires_at, is_revoked, created_at
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TokenStoreError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_value(&self, token: &str) -> Result<Option<RefreshToken>, TokenStoreError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, token, user_id, expires_at, is_revoked, created_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TokenStoreError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn revoke(&self, token: &str) -> Result<bool, TokenStoreError> {
        // Matches already-revoked rows too, so revocation stays idempotent.
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| TokenStoreError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, TokenStoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TokenStoreError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
