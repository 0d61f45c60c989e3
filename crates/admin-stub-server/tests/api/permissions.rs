use admin_client_core::{NotificationLevel, RequestOptions};
use admin_shared::{
    const_config::{
        envelope_code::CODE_FORBIDDEN,
        permission::{PERM_USER_CREATE, PERM_USER_LIST, PERM_USER_QUERY},
    },
    req_args::ListQuery,
};

use crate::helpers::{assert_app_error, spawn_app, user_draft};

#[tokio::test]
async fn unprivileged_user_is_denied() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let actual = app
        .core_client
        .list_users(&ListQuery::default(), &RequestOptions::default())
        .await;

    // Assert
    assert_app_error(actual, CODE_FORBIDDEN);
    let notifications = app.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert!(
        notifications[0].message.contains(PERM_USER_LIST),
        "message names the missing permission"
    );
    assert!(app.core_client.is_logged_in(), "denial does not end the session");
}

#[tokio::test]
async fn silent_denial_is_not_reported() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let actual = app
        .core_client
        .list_users(&ListQuery::default(), &RequestOptions::silent())
        .await;

    // Assert
    assert_app_error(actual, CODE_FORBIDDEN);
    assert!(app.notifier.is_empty());
}

#[tokio::test]
async fn granted_permissions_are_enforced_individually() {
    // Arrange
    let app = spawn_app().await;
    let user = app.create_user_with_permissions(&[PERM_USER_LIST, PERM_USER_QUERY]);
    app.core_client.login(user.login_args()).await.unwrap();

    // Act
    let listed = app
        .core_client
        .list_users(&ListQuery::default(), &RequestOptions::default())
        .await;
    let created = app
        .core_client
        .create_user(
            &user_draft("should-not-exist"),
            &"password".to_string().into(),
            &RequestOptions::default(),
        )
        .await;

    // Assert
    listed.unwrap();
    assert_app_error(created, CODE_FORBIDDEN);
    assert!(app.core_client.is_allowed(PERM_USER_QUERY, false));
    assert!(!app.core_client.is_allowed(PERM_USER_CREATE, false));
}
