use crate::helpers::spawn_app;

#[tokio::test]
async fn no_notification_is_active_before_any_submission() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_notification().await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn a_successful_join_publishes_a_success_notification() {
    // Arrange
    let app = spawn_app().await;

    // Act
    app.post_waitlist(&serde_json::json!({"email": "user@example.com"}))
        .await;

    // Assert
    let body: serde_json::Value = app.get_notification().await.json().await.unwrap();
    assert_eq!(body["kind"], "success");
    assert_eq!(body["message"], "Access Granted. You are on the list.");
}

#[tokio::test]
async fn a_newer_outcome_supersedes_the_active_notification() {
    // Arrange
    let app = spawn_app().await;

    // Act
    app.post_waitlist(&serde_json::json!({"email": "dup@example.com"}))
        .await;
    app.post_waitlist(&serde_json::json!({"email": "dup@example.com"}))
        .await;

    // Assert
    let body: serde_json::Value = app.get_notification().await.json().await.unwrap();
    assert_eq!(body["kind"], "error");
    assert_eq!(body["message"], "You are already on the waitlist.");
}

#[tokio::test]
async fn dismissing_clears_the_active_notification() {
    // Arrange
    let app = spawn_app().await;
    app.post_waitlist(&serde_json::json!({"email": "user@example.com"}))
        .await;

    // Act
    let response = app.dismiss_notification().await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = app.get_notification().await.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn dismissal_is_idempotent() {
    // Arrange
    let app = spawn_app().await;
    app.post_waitlist(&serde_json::json!({"email": "user@example.com"}))
        .await;

    // Act
    let first = app.dismiss_notification().await;
    let second = app.dismiss_notification().await;

    // Assert
    assert_eq!(200, first.status().as_u16());
    assert_eq!(200, second.status().as_u16());
    let body: serde_json::Value = app.get_notification().await.json().await.unwrap();
    assert!(body.is_null());
}
