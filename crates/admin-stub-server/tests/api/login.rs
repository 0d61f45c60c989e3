use admin_client_core::{Notification, RequestError};
use admin_shared::{
    const_config::{
        client::notify::NOTIFY_SESSION_EXPIRED,
        envelope_code::{CODE_LOGIN_FAILED, CODE_USER_DISABLED},
    },
    req_args::LoginReqArgs,
    uac::UserStatus,
};
use secrecy::SecretString;

use crate::helpers::{assert_app_error, spawn_app};

#[tokio::test]
async fn login_failure_invalid_user() {
    // Arrange
    let app = spawn_app().await;
    let login_args = LoginReqArgs::new(
        "random-username".to_string(),
        SecretString::from("random-password".to_string()),
    );

    // Act
    let actual = app.core_client.login(login_args).await;

    // Assert
    assert_app_error(actual, CODE_LOGIN_FAILED);
    assert!(!app.core_client.is_logged_in());
    assert_eq!(app.notifier.len(), 1);
}

#[tokio::test]
async fn login_failure_invalid_password() {
    // Arrange
    let app = spawn_app().await;
    let login_args = LoginReqArgs::new(
        app.test_user.username.clone(),
        SecretString::from("random-password".to_string()),
    );

    // Act
    let actual = app.core_client.login(login_args).await;

    // Assert
    assert_app_error(actual, CODE_LOGIN_FAILED);
}

#[tokio::test]
async fn login_failure_not_enabled() {
    // Arrange
    let app = spawn_app().await;
    let id = app.test_user.id(&app.store);
    app.store.set_user_status(id, UserStatus::Disabled).unwrap();

    // Act
    let actual = app.login().await;

    // Assert
    assert_app_error(actual, CODE_USER_DISABLED);
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn login_logout_round_trip() {
    // Arrange
    let app = spawn_app().await;
    assert!(!app.core_client.is_logged_in());

    // Act - Login
    let login_response = app.login().await.unwrap();

    // Assert - Session stored
    assert!(app.core_client.is_logged_in());
    assert_eq!(
        app.core_client.user_info().unwrap().username.as_ref(),
        app.test_user.username
    );
    assert_eq!(
        app.core_client.session().token(),
        Some(login_response.token)
    );
    assert_eq!(app.store.session_count(), 1);

    // Act - Logout
    app.logout_assert().await;

    // Assert - Session ended on both sides
    assert_eq!(app.store.session_count(), 0);
    assert!(app.core_client.user_info().is_none());

    // Act - Logout again
    app.logout_assert().await;

    // Assert - Nothing reported for either logout
    assert!(app.notifier.is_empty());
}

#[tokio::test]
async fn user_info_refreshes_session() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let actual = app.core_client.get_user_info().await.unwrap();

    // Assert
    assert_eq!(actual.username.as_ref(), app.admin_user.username);
    assert_eq!(app.core_client.user_info(), Some(actual));
    assert!(app.core_client.is_allowed("system:anything:at:all", false));
}

#[tokio::test]
async fn user_info_requires_login() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let actual = app.core_client.get_user_info().await;

    // Assert
    assert!(matches!(actual, Err(RequestError::Unauthorized { .. })));
    assert_eq!(
        app.notifier.notifications(),
        vec![Notification::warning(NOTIFY_SESSION_EXPIRED)]
    );
}

#[tokio::test]
async fn ended_session_clears_login_and_is_reported() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;
    app.store.end_all_sessions();

    // Act
    let actual = app.core_client.get_user_info().await;

    // Assert
    assert!(actual.unwrap_err().is_auth_error());
    assert!(!app.core_client.is_logged_in());
    assert!(app.core_client.user_info().is_none());
    assert_eq!(
        app.notifier.notifications(),
        vec![Notification::warning(NOTIFY_SESSION_EXPIRED)]
    );
}

#[tokio::test]
async fn logout_after_server_ended_session_still_succeeds() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;
    app.store.end_all_sessions();

    // Act
    let actual = app.core_client.logout().await;

    // Assert
    actual.unwrap();
    assert!(!app.core_client.is_logged_in());
    assert!(app.notifier.is_empty());
}
