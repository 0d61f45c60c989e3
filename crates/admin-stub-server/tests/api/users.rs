use admin_client_core::{Notification, NotificationLevel, RequestOptions};
use admin_shared::{
    const_config::{
        client::notify::NOTIFY_SESSION_EXPIRED,
        envelope_code::{CODE_BAD_REQUEST, CODE_LOGIN_FAILED, CODE_NOT_FOUND},
    },
    id::DbId,
    req_args::ListQuery,
    uac::UserStatus,
};
use secrecy::SecretString;

use crate::helpers::{assert_app_error, spawn_app, user_draft, TestUser};

#[tokio::test]
async fn create_then_read_user() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let new_user = TestUser::generate("created");
    let draft = user_draft(&new_user.username);

    // Act
    let created = app
        .core_client
        .create_user(
            &draft,
            &SecretString::from(new_user.password.clone()),
            &RequestOptions::default().with_success_message("User created"),
        )
        .await
        .unwrap();
    let fetched = app
        .core_client
        .get_user(created.id, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(fetched, created);
    assert_eq!(fetched.username, draft.username);
    assert_eq!(fetched.email, draft.email);
    assert_eq!(
        app.notifier.notifications(),
        vec![Notification::success("User created")]
    );

    // Act - New user can log in
    let (client, _) = app.new_client();
    let actual = client.login(new_user.login_args()).await;

    // Assert
    actual.unwrap();
}

#[tokio::test]
async fn list_users_filters_and_pages() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let all = app
        .core_client
        .list_users(&ListQuery::default(), &RequestOptions::default())
        .await
        .unwrap();
    let filtered = app
        .core_client
        .list_users(
            &ListQuery {
                keyword: Some(app.test_user.username.to_uppercase()),
                ..Default::default()
            },
            &RequestOptions::default(),
        )
        .await
        .unwrap();
    let first_page = app
        .core_client
        .list_users(&ListQuery::default().page(1, 1), &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(all.total, 2, "seeded admin plus the test user");
    assert_eq!(all.items.len(), 2);
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.items[0].username.as_ref(), app.test_user.username);
    assert_eq!(first_page.items.len(), 1);
    assert_eq!(first_page.total, 2);
}

#[tokio::test]
async fn update_user() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let id = app.test_user.id(&app.store);
    let mut draft = user_draft(&app.test_user.username);
    draft.display_name = "Renamed".try_into().unwrap();

    // Act
    let actual = app
        .core_client
        .update_user(id, &draft, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(actual.id, id);
    assert_eq!(actual.display_name.to_string(), "Renamed");
    assert_eq!(app.store.get_user(id).unwrap(), actual);
}

#[tokio::test]
async fn missing_user_is_not_found() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let actual = app
        .core_client
        .get_user(DbId::from(999_999), &RequestOptions::default())
        .await;

    // Assert
    assert_app_error(actual, CODE_NOT_FOUND);
    assert_eq!(app.notifier.len(), 1);
    assert_eq!(app.notifier.notifications()[0].level, NotificationLevel::Error);
    assert!(app.core_client.is_logged_in(), "only a 401 ends the session");
}

#[tokio::test]
async fn reset_password_replaces_old_one() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let id = app.test_user.id(&app.store);
    let new_password = "a-brand-new-password".to_string();

    // Act
    app.core_client
        .reset_password(
            id,
            &SecretString::from(new_password.clone()),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    // Assert - Old password rejected
    let (client, _) = app.new_client();
    assert_app_error(
        client.login(app.test_user.login_args()).await,
        CODE_LOGIN_FAILED,
    );

    // Assert - New password accepted
    let user = TestUser {
        password: new_password,
        ..app.test_user.clone()
    };
    client.login(user.login_args()).await.unwrap();
}

#[tokio::test]
async fn disabling_user_expires_their_session() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let (user_client, user_notifier) = app.new_client();
    user_client.login(app.test_user.login_args()).await.unwrap();
    let id = app.test_user.id(&app.store);

    // Act - Admin disables the user
    let updated = app
        .core_client
        .set_user_status(id, UserStatus::Disabled, &RequestOptions::default())
        .await
        .unwrap();

    // Act - User makes their next request
    let actual = user_client.get_user_info().await;

    // Assert
    assert_eq!(updated.status, UserStatus::Disabled);
    assert!(actual.unwrap_err().is_auth_error());
    assert!(!user_client.is_logged_in());
    assert_eq!(
        user_notifier.notifications(),
        vec![Notification::warning(NOTIFY_SESSION_EXPIRED)]
    );
    assert!(app.core_client.is_logged_in());
}

#[tokio::test]
async fn delete_user() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let id = app.test_user.id(&app.store);

    // Act
    app.core_client
        .delete_user(id, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_app_error(
        app.core_client.get_user(id, &RequestOptions::silent()).await,
        CODE_NOT_FOUND,
    );
    let (client, _) = app.new_client();
    assert_app_error(
        client.login(app.test_user.login_args()).await,
        CODE_LOGIN_FAILED,
    );
}

#[tokio::test]
async fn cannot_delete_self() {
    // Arrange
    let app = spawn_app().await;
    let admin_info = app.login_admin().await.unwrap().user_info;

    // Act
    let actual = app
        .core_client
        .delete_user(admin_info.id, &RequestOptions::default())
        .await;

    // Assert
    assert_app_error(actual, CODE_BAD_REQUEST);
}
