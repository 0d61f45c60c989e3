use admin_client_core::RequestOptions;
use admin_shared::{
    const_config::envelope_code::CODE_BAD_REQUEST,
    req_args::ListQuery,
    uac::{Permissions, RoleDraft},
};

use crate::helpers::{assert_app_error, spawn_app, TestUser};

fn role_draft(key: &str) -> RoleDraft {
    RoleDraft {
        name: "Editors".try_into().unwrap(),
        key: key.try_into().unwrap(),
        description: "Created in test".try_into().unwrap(),
        permissions: ["system:dict:list"].iter().collect(),
    }
}

#[tokio::test]
async fn create_role_and_list() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let created = app
        .core_client
        .create_role(&role_draft("editor"), &RequestOptions::default())
        .await
        .unwrap();
    let listed = app
        .core_client
        .list_roles(&ListQuery::default().keyword("editor"), &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(listed.total, 1);
    assert_eq!(listed.items, vec![created]);
}

#[tokio::test]
async fn role_permission_changes_apply_to_existing_sessions() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let role = app
        .core_client
        .create_role(&role_draft("editor"), &RequestOptions::default())
        .await
        .unwrap();
    let user = TestUser::generate("editor");
    user.store(&app.store, vec![role.id]);
    let (user_client, _) = app.new_client();
    user_client.login(user.login_args()).await.unwrap();
    assert!(!user_client.is_allowed("system:log:list", false));
    let new_permissions: Permissions = ["system:log:*"].iter().collect();

    // Act
    let updated = app
        .core_client
        .set_role_permissions(role.id, new_permissions.clone(), &RequestOptions::default())
        .await
        .unwrap();
    user_client.get_user_info().await.unwrap();

    // Assert
    assert_eq!(updated.permissions, new_permissions);
    assert!(user_client.is_allowed("system:log:list", false));
    assert!(!user_client.is_allowed("system:dict:list", false));
}

#[tokio::test]
async fn update_role() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let role = app
        .core_client
        .create_role(&role_draft("editor"), &RequestOptions::default())
        .await
        .unwrap();
    let mut draft = role_draft("editor");
    draft.name = "Writers".try_into().unwrap();

    // Act
    let actual = app
        .core_client
        .update_role(role.id, &draft, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(actual.id, role.id);
    assert_eq!(&*actual.name, "Writers");
}

#[tokio::test]
async fn delete_unused_role() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let role = app
        .core_client
        .create_role(&role_draft("editor"), &RequestOptions::default())
        .await
        .unwrap();

    // Act
    app.core_client
        .delete_role(role.id, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    let (roles, _) = app.store.list_roles(&ListQuery::default());
    assert!(roles.iter().all(|x| x.id != role.id));
}

#[tokio::test]
async fn delete_assigned_role_is_refused() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let (roles, _) = app.store.list_roles(&ListQuery::default().keyword("admin"));
    let admin_role = roles.into_iter().find(|x| &*x.key == "admin").unwrap();

    // Act
    let actual = app
        .core_client
        .delete_role(admin_role.id, &RequestOptions::default())
        .await;

    // Assert
    assert_app_error(actual, CODE_BAD_REQUEST);
}
