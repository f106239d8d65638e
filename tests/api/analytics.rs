use crate::helpers::spawn_app;
use sqlx::Row;

#[tokio::test]
async fn the_beacon_returns_a_204_and_persists_the_visit() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_page_view(&serde_json::json!({"path": "/", "referrer": "https://news.ycombinator.com/"}))
        .await;

    // Assert
    assert_eq!(204, response.status().as_u16());

    let saved = sqlx::query("SELECT visitor_id, path, referrer FROM page_views")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch saved page view.");
    assert!(!saved.get::<String, _>("visitor_id").is_empty());
    assert_eq!(saved.get::<String, _>("path"), "/");
    assert_eq!(
        saved.get::<String, _>("referrer"),
        "https://news.ycombinator.com/"
    );
}

#[tokio::test]
async fn the_referrer_may_be_omitted() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_page_view(&serde_json::json!({"path": "/"})).await;

    // Assert
    assert_eq!(204, response.status().as_u16());

    let saved = sqlx::query("SELECT referrer FROM page_views")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch saved page view.");
    assert_eq!(saved.get::<String, _>("referrer"), "");
}

#[tokio::test]
async fn the_visitor_id_is_stable_across_page_views() {
    // Arrange
    let app = spawn_app().await;

    // Act
    app.post_page_view(&serde_json::json!({"path": "/"})).await;
    app.post_page_view(&serde_json::json!({"path": "/"})).await;

    // Assert
    let saved = sqlx::query("SELECT COUNT(DISTINCT visitor_id) AS visitors FROM page_views")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count visitors.");
    assert_eq!(saved.get::<i64, _>("visitors"), 1);
}

#[tokio::test]
async fn different_browser_profiles_get_different_visitor_ids() {
    // Arrange
    let app = spawn_app().await;

    // Act
    app.post_page_view(&serde_json::json!({"path": "/"})).await;
    app.new_visitor()
        .post(format!("{}/analytics/page_views", &app.address))
        .json(&serde_json::json!({"path": "/"}))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    let saved = sqlx::query("SELECT COUNT(DISTINCT visitor_id) AS visitors FROM page_views")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count visitors.");
    assert_eq!(saved.get::<i64, _>("visitors"), 2);
}

#[tokio::test]
async fn the_beacon_swallows_database_failures() {
    // Arrange
    let app = spawn_app().await;

    // Sabotage the database
    sqlx::query("DROP TABLE page_views;")
        .execute(&app.db_pool)
        .await
        .unwrap();

    // Act
    let response = app.post_page_view(&serde_json::json!({"path": "/"})).await;

    // Assert
    assert_eq!(204, response.status().as_u16());
}
