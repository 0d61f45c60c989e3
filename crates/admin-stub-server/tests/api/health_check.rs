use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let actual = app.core_client.health_check().await;

    // Assert
    actual.unwrap();
    assert!(app.notifier.is_empty());
}
