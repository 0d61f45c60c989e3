use admin_client_core::RequestOptions;
use admin_shared::{
    const_config::path::PATH_API_ROLES_CREATE, req_args::ListQuery, system::OperationOutcome,
    uac::RoleDraft,
};

use crate::helpers::spawn_app;

#[tokio::test]
async fn mutations_are_logged_newest_first() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    let draft = RoleDraft {
        name: "Logged".try_into().unwrap(),
        key: "logged".try_into().unwrap(),
        description: Default::default(),
        permissions: Default::default(),
    };
    app.core_client
        .create_role(&draft, &RequestOptions::default())
        .await
        .unwrap();
    // Second attempt fails as the key is taken
    let _ = app
        .core_client
        .create_role(&draft, &RequestOptions::silent())
        .await;

    // Act
    let actual = app
        .core_client
        .list_logs(&ListQuery::default(), &RequestOptions::default())
        .await
        .unwrap();

    // Assert - The login, then the two role creations. Reads are not logged
    assert_eq!(actual.total, 3);
    let outcomes: Vec<OperationOutcome> = actual.items.iter().map(|x| x.outcome).collect();
    assert_eq!(
        outcomes,
        [
            OperationOutcome::Failure,
            OperationOutcome::Success,
            OperationOutcome::Success
        ]
    );
    assert_eq!(actual.items[0].path, PATH_API_ROLES_CREATE.path);
    assert_eq!(actual.items[0].username, app.admin_user.username);
}

#[tokio::test]
async fn delete_and_clear_logs() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin_assert().await;
    app.login_admin_assert().await;
    let (logs, _) = app.store.list_logs(&ListQuery::default());
    assert_eq!(logs.len(), 2);

    // Act - Delete one
    app.core_client
        .delete_log(logs[0].id, &RequestOptions::default())
        .await
        .unwrap();

    // Assert - The delete itself is logged too
    let (after_delete, _) = app.store.list_logs(&ListQuery::default());
    assert_eq!(after_delete.len(), 2);
    assert!(after_delete.iter().all(|x| x.id != logs[0].id));

    // Act - Clear
    let removed = app
        .core_client
        .clear_logs(&RequestOptions::default())
        .await
        .unwrap();

    // Assert - Only the entry for the clear request is left
    assert_eq!(removed, 2);
    let (after_clear, _) = app.store.list_logs(&ListQuery::default());
    assert_eq!(after_clear.len(), 1);
}
