use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::token::errors::TokenStoreError;
use identity_service::domain::token::models::NewRefreshToken;
use identity_service::domain::token::models::RefreshToken;
use identity_service::domain::token::ports::RefreshTokenRepository;
use identity_service::domain::user::errors::UserError;
use identity_service::domain::user::models::NewUser;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::outbound::crypto::Argon2CredentialHasher;
use identity_service::outbound::crypto::JwtAccessTokenIssuer;

const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user store mirroring the relational schema: ids are assigned
/// sequentially from 1 and emails are unique.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let now = Utc::now();
        let created = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.clone())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);

        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

/// In-memory refresh-token store.
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<Vec<RefreshToken>>,
    next_id: AtomicI64,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Push a stored token's expiry into the past.
    pub fn force_expire(&self, value: &str) {
        let mut tokens = self.tokens.lock().unwrap();
        if let Some(token) = tokens.iter_mut().find(|t| t.token == value) {
            token.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    pub fn count_for_user(&self, user_id: &UserId) -> usize {
        let tokens = self.tokens.lock().unwrap();
        tokens.iter().filter(|t| t.user_id == *user_id).count()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken, TokenStoreError> {
        let mut tokens = self.tokens.lock().unwrap();

        let created = RefreshToken {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            token: token.token,
            user_id: token.user_id,
            expires_at: token.expires_at,
            is_revoked: false,
            created_at: Utc::now(),
        };
        tokens.push(created.clone());

        Ok(created)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<RefreshToken>, TokenStoreError> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens.iter().find(|t| t.token == value).cloned())
    }

    async fn revoke(&self, value: &str) -> Result<bool, TokenStoreError> {
        let mut tokens = self.tokens.lock().unwrap();

        match tokens.iter_mut().find(|t| t.token == value) {
            Some(token) => {
                token.is_revoked = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, TokenStoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.user_id != *user_id);

        Ok((before - tokens.len()) as u64)
    }
}

pub type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemoryRefreshTokenRepository,
    Argon2CredentialHasher,
    JwtAccessTokenIssuer,
>;

pub type TestUserService =
    UserService<InMemoryUserRepository, InMemoryRefreshTokenRepository, Argon2CredentialHasher>;

/// Wired-up services backed by in-memory stores and real crypto.
pub struct TestApp {
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<InMemoryRefreshTokenRepository>,
    pub auth_service: TestAuthService,
    pub user_service: TestUserService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_access_token_lifetime(Duration::minutes(5))
    }

    /// Build an app whose access tokens carry the given lifetime. A negative
    /// lifetime mints already-expired tokens.
    pub fn with_access_token_lifetime(access_lifetime: Duration) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let hasher = Arc::new(Argon2CredentialHasher::new());
        let issuer = Arc::new(JwtAccessTokenIssuer::new(JWT_SECRET, access_lifetime));

        let auth_service = AuthService::new(
            Arc::clone(&users),
            Arc::clone(&tokens),
            Arc::clone(&hasher),
            issuer,
            Duration::days(7),
        );
        let user_service =
            UserService::new(Arc::clone(&users), Arc::clone(&tokens), Arc::clone(&hasher));

        Self {
            users,
            tokens,
            auth_service,
            user_service,
        }
    }
}
