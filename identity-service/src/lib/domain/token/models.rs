use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Persisted refresh-token session record.
///
/// Immutable after creation except for the revoked flag, which only ever
/// moves false -> true. There is no update timestamp by design.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: i64,
    /// Opaque random bearer value, also the lookup key.
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether the absolute expiry has strictly passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Fields of a refresh-token record before the store assigns id and
/// creation timestamp. Always starts unrevoked.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let token = RefreshToken {
            id: 1,
            token: "opaque".to_string(),
            user_id: UserId(1),
            expires_at: now,
            is_revoked: false,
            created_at: now - Duration::days(7),
        };

        // Exactly at expiry is still usable; one step past is not.
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::seconds(1)));
    }
}
