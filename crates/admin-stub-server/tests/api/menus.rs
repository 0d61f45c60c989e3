use admin_client_core::RequestOptions;
use admin_shared::{
    const_config::envelope_code::CODE_BAD_REQUEST,
    const_config::permission::{PERM_LOG_LIST, PERM_USER_LIST, PERM_USER_QUERY},
    system::{MenuDraft, MenuKind},
    uac::RouteNode,
};

use crate::helpers::{assert_app_error, spawn_app};

fn paths(nodes: &[RouteNode]) -> Vec<&str> {
    nodes.iter().map(|x| x.path.as_str()).collect()
}

#[tokio::test]
async fn menu_tree_is_nested_and_sorted() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let actual = app
        .core_client
        .menu_tree(&RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(actual.len(), 1);
    let system = &actual[0];
    assert_eq!(system.kind, MenuKind::Directory);
    let names: Vec<&str> = system.children.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(
        names,
        ["Users", "Roles", "Menus", "Dictionaries", "Operation Logs"]
    );
    assert_eq!(system.children[0].children[0].kind, MenuKind::Button);
}

#[tokio::test]
async fn admin_sees_every_page() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let actual = app
        .core_client
        .visible_menu_routes(&RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(paths(&actual), ["/system"]);
    assert_eq!(
        paths(&actual[0].children),
        ["user", "role", "menu", "dict", "log"]
    );
    assert!(
        actual[0].children[0].children.is_empty(),
        "buttons are not routes"
    );
}

#[tokio::test]
async fn visible_menu_follows_permissions() {
    // Arrange
    let app = spawn_app().await;
    let auditor =
        app.create_user_with_permissions(&[PERM_USER_LIST, PERM_USER_QUERY, PERM_LOG_LIST]);
    app.core_client.login(auditor.login_args()).await.unwrap();

    // Act
    let actual = app
        .core_client
        .visible_menu_routes(&RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(paths(&actual), ["/system"]);
    assert_eq!(paths(&actual[0].children), ["user", "log"]);
    assert_eq!(actual[0].children[1].title.as_deref(), Some("Operation Logs"));
}

#[tokio::test]
async fn user_without_permissions_sees_no_menu() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let actual = app
        .core_client
        .visible_menu_routes(&RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert!(actual.is_empty());
}

#[tokio::test]
async fn create_update_delete_menu() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let system_id = app.store.menu_tree()[0].id;
    let mut draft = MenuDraft {
        parent_id: Some(system_id),
        name: "Reports".to_string(),
        kind: MenuKind::Page,
        path: Some("report".to_string()),
        icon: None,
        permission: Some("system:report:list".to_string()),
        hidden: false,
        sort: 10,
    };

    // Act - Create
    let created = app
        .core_client
        .create_menu(&draft, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    let tree = app.store.menu_tree();
    assert_eq!(tree[0].children.last().unwrap().id, created.id);

    // Act - Update
    draft.hidden = true;
    let updated = app
        .core_client
        .update_menu(created.id, &draft, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert!(updated.hidden);

    // Act - Delete
    app.core_client
        .delete_menu(created.id, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(app.store.menu_tree()[0].children.len(), 5);
}

#[tokio::test]
async fn menu_with_children_cannot_be_deleted() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let system_id = app.store.menu_tree()[0].id;

    // Act
    let actual = app
        .core_client
        .delete_menu(system_id, &RequestOptions::default())
        .await;

    // Assert
    assert_app_error(actual, CODE_BAD_REQUEST);
}
