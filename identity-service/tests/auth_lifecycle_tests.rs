mod common;

use chrono::Duration;
use common::TestApp;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::models::RegisterCommand;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::ports::UserServicePort;

fn register_command(email: &str, password: &str) -> RegisterCommand {
    RegisterCommand {
        email: EmailAddress::new(email.to_string()).expect("valid email"),
        password: password.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
    }
}

#[tokio::test]
async fn test_register_issues_working_token_pair() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    assert_eq!(session.user.id, UserId(1));
    assert_eq!(session.user.email.as_str(), "a@x.com");
    assert_eq!(session.refresh_token.len(), 64);

    let claims = app
        .auth_service
        .verify_access_token(&session.access_token)
        .await
        .expect("Failed to verify access token");
    assert_eq!(claims.user_id().expect("numeric subject"), UserId(1));
}

#[tokio::test]
async fn test_register_never_stores_plaintext_password() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    assert_ne!(session.user.password_hash, "pass_word!");
    assert!(session.user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_duplicate_register_leaves_single_user() {
    let app = TestApp::new();

    app.auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    let result = app
        .auth_service
        .register(register_command("a@x.com", "another_password"))
        .await;
    assert!(matches!(result, Err(AuthError::UserAlreadyExists(_))));

    let users = app.user_service.list_users().await.expect("Failed to list");
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_login_returns_same_user_with_fresh_tokens() {
    let app = TestApp::new();

    let registered = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    let logged_in = app
        .auth_service
        .login("a@x.com", "pass_word!")
        .await
        .expect("Failed to login");

    assert_eq!(logged_in.user.id, registered.user.id);
    // Logins are additive: a brand-new refresh token, old one untouched
    assert_ne!(logged_in.refresh_token, registered.refresh_token);
    assert_eq!(app.tokens.count_for_user(&registered.user.id), 2);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();

    app.auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    let wrong_password = app
        .auth_service
        .login("a@x.com", "wrong_password")
        .await
        .expect_err("Wrong password must not authenticate");
    let unknown_email = app
        .auth_service
        .login("nobody@x.com", "pass_word!")
        .await
        .expect_err("Unknown email must not authenticate");

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_refresh_does_not_rotate_the_refresh_token() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    // The same stored token mints access tokens repeatedly
    for _ in 0..3 {
        let access_token = app
            .auth_service
            .refresh_access_token(&session.refresh_token)
            .await
            .expect("Failed to refresh");

        let claims = app
            .auth_service
            .verify_access_token(&access_token)
            .await
            .expect("Failed to verify minted token");
        assert_eq!(claims.user_id().expect("numeric subject"), session.user.id);
    }

    assert_eq!(app.tokens.count_for_user(&session.user.id), 1);
}

#[tokio::test]
async fn test_refresh_with_unknown_token() {
    let app = TestApp::new();

    let result = app.auth_service.refresh_access_token("no-such-token").await;
    assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
}

#[tokio::test]
async fn test_refresh_after_logout() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    app.auth_service
        .logout(&session.refresh_token)
        .await
        .expect("Failed to logout");

    let result = app
        .auth_service
        .refresh_access_token(&session.refresh_token)
        .await;
    assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
}

#[tokio::test]
async fn test_revocation_reported_over_expiry() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    app.auth_service
        .logout(&session.refresh_token)
        .await
        .expect("Failed to logout");
    app.tokens.force_expire(&session.refresh_token);

    // Both revoked and expired: revocation wins
    let result = app
        .auth_service
        .refresh_access_token(&session.refresh_token)
        .await;
    assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
}

#[tokio::test]
async fn test_refresh_with_expired_token() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    app.tokens.force_expire(&session.refresh_token);

    let result = app
        .auth_service
        .refresh_access_token(&session.refresh_token)
        .await;
    assert!(matches!(result, Err(AuthError::TokenExpired(_))));
}

#[tokio::test]
async fn test_refresh_when_owner_is_gone() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    // Remove the user directly, leaving the token orphaned
    app.users
        .delete(&session.user.id)
        .await
        .expect("Failed to delete user");

    let result = app
        .auth_service
        .refresh_access_token(&session.refresh_token)
        .await;
    assert!(matches!(result, Err(AuthError::UserNotFound(_))));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new();

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    app.auth_service
        .logout(&session.refresh_token)
        .await
        .expect("Failed to logout");
    app.auth_service
        .logout(&session.refresh_token)
        .await
        .expect("Second logout of the same token must succeed");
}

#[tokio::test]
async fn test_logout_with_unknown_token() {
    let app = TestApp::new();

    let result = app.auth_service.logout("no-such-token").await;
    assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
}

#[tokio::test]
async fn test_verify_rejects_expired_access_token() {
    let app = TestApp::with_access_token_lifetime(Duration::hours(-1));

    let session = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");

    let result = app
        .auth_service
        .verify_access_token(&session.access_token)
        .await;
    assert!(matches!(result, Err(AuthError::TokenExpired(_))));
}

#[tokio::test]
async fn test_verify_rejects_malformed_access_token() {
    let app = TestApp::new();

    let result = app.auth_service.verify_access_token("not.a.token").await;
    assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::new();

    // Register: first user gets id 1 and a working pair
    let registered = app
        .auth_service
        .register(register_command("a@x.com", "pass_word!"))
        .await
        .expect("Failed to register");
    assert_eq!(registered.user.id, UserId(1));

    // Login issues a second, distinct refresh token
    let logged_in = app
        .auth_service
        .login("a@x.com", "pass_word!")
        .await
        .expect("Failed to login");
    assert_ne!(logged_in.refresh_token, registered.refresh_token);

    // Wrong password is rejected
    let denied = app.auth_service.login("a@x.com", "wrong!").await;
    assert!(matches!(denied, Err(AuthError::InvalidCredentials)));

    // Logout of the registration token kills only that token
    app.auth_service
        .logout(&registered.refresh_token)
        .await
        .expect("Failed to logout");

    let dead = app
        .auth_service
        .refresh_access_token(&registered.refresh_token)
        .await;
    assert!(matches!(dead, Err(AuthError::TokenInvalid(_))));

    // The login token still works
    let access_token = app
        .auth_service
        .refresh_access_token(&logged_in.refresh_token)
        .await
        .expect("Login token must survive the other logout");

    let claims = app
        .auth_service
        .verify_access_token(&access_token)
        .await
        .expect("Failed to verify access token");
    assert_eq!(claims.user_id().expect("numeric subject"), UserId(1));
}
