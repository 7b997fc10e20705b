use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::ports::CredentialHasher;
use crate::domain::token::ports::RefreshTokenRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// User lifecycle service.
///
/// Holds the refresh-token store as well as the user store so that user
/// deletion can cascade over owned tokens before the user row goes away.
pub struct UserService<UR, TR, CH>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    CH: CredentialHasher,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    hasher: Arc<CH>,
}

impl<UR, TR, CH> UserService<UR, TR, CH>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    CH: CredentialHasher,
{
    pub fn new(users: Arc<UR>, tokens: Arc<TR>, hasher: Arc<CH>) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }
}

#[async_trait]
impl<UR, TR, CH> UserServicePort for UserService<UR, TR, CH>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    CH: CredentialHasher,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if let Some(existing) = self.users.find_by_email(command.email.as_str()).await? {
            return Err(UserError::EmailAlreadyExists(
                existing.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        self.users
            .create(NewUser {
                email: command.email,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
            })
            .await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            // Re-check uniqueness only when the email actually changes; the
            // current owner is excluded by construction.
            if new_email != user.email
                && self
                    .users
                    .find_by_email(new_email.as_str())
                    .await?
                    .is_some()
            {
                return Err(UserError::EmailAlreadyExists(
                    new_email.as_str().to_string(),
                ));
            }
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .hasher
                .hash(&new_password)
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        user.updated_at = Utc::now();

        self.users.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        // Existence check first so a miss is reported as NotFound rather
        // than silently cascading over nothing.
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        // Tokens go first: no refresh token may ever reference a missing
        // user, even transiently.
        let removed = self
            .tokens
            .delete_by_user(id)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        tracing::debug!(user_id = %id, removed, "Cascade-deleted refresh tokens");

        self.users.delete(id).await
    }
}
