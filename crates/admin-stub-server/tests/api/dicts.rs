use admin_client_core::RequestOptions;
use admin_shared::{
    const_config::envelope_code::CODE_NOT_FOUND, req_args::ListQuery, system::DictItemDraft,
};

use crate::helpers::{assert_app_error, spawn_app};

#[tokio::test]
async fn list_dictionaries() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;

    // Act
    let actual = app
        .core_client
        .list_dict_types(&ListQuery::default(), &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    let codes: Vec<&str> = actual.items.iter().map(|x| x.code.as_str()).collect();
    assert_eq!(codes, ["sys_user_status", "sys_yes_no"]);
    assert_eq!(actual.total, 2);
}

#[tokio::test]
async fn dictionary_items_only_need_a_session() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let actual = app
        .core_client
        .list_dict_items("sys_user_status", &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    let values: Vec<&str> = actual.items.iter().map(|x| x.value.as_str()).collect();
    assert_eq!(values, ["enabled", "disabled"]);
}

#[tokio::test]
async fn unknown_dictionary_is_not_found() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let actual = app
        .core_client
        .list_dict_items("does_not_exist", &RequestOptions::default())
        .await;

    // Assert
    assert_app_error(actual, CODE_NOT_FOUND);
}

#[tokio::test]
async fn create_update_delete_item() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let mut draft = DictItemDraft {
        dict_code: "sys_yes_no".to_string(),
        label: "Maybe".to_string(),
        value: "M".to_string(),
        sort: 5,
    };

    // Act - Create
    let created = app
        .core_client
        .create_dict_item(&draft, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    let items = app.store.list_dict_items("sys_yes_no").unwrap();
    assert_eq!(items.last(), Some(&created));

    // Act - Update
    draft.label = "Perhaps".to_string();
    let updated = app
        .core_client
        .update_dict_item(created.id, &draft, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.label, "Perhaps");

    // Act - Delete
    app.core_client
        .delete_dict_item(created.id, &RequestOptions::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(app.store.list_dict_items("sys_yes_no").unwrap().len(), 2);
}
