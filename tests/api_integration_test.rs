use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use tankwiki::api;
use tankwiki::config::Config;
use tankwiki::db;
use tankwiki::infrastructure::AppState;
use tankwiki::models::product;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app backed by an in-memory database
async fn setup_test_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db.clone(), &Config::default());
    (api::api_router(state), db)
}

async fn send(app: &Router, method: &str, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match payload {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tankwiki");
}

#[tokio::test]
async fn test_mapping_suggestions() {
    let (app, _db) = setup_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/import/mapping",
        Some(json!({ "headers": ["Product Link", "Shipping Weight (lbs)", "Notes"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mapping"]["Product Link"], "amazon_url");
    assert_eq!(body["mapping"]["Shipping Weight (lbs)"], "weight");
    assert_eq!(body["mapping"]["Notes"], "ignore");
}

#[tokio::test]
async fn test_preview_lists_errors_without_inserting() {
    let (app, db) = setup_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/import/preview",
        Some(json!({
            "format": "csv",
            "content": "name,price\nTetra Filter,19.99\nNitrate Test,abc",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["row"], 2);
    assert_eq!(body["errors"][0]["field"], "regular_price");
    assert_eq!(body["errors"][0]["value"], "abc");
    assert_eq!(body["mapping"]["price"], "regular_price");

    let count = product::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_commit_rejects_invalid_batch_with_422() {
    let (app, db) = setup_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/import",
        Some(json!({
            "format": "csv",
            "content": "name,price\nTetra Filter,19.99\n,5.00",
            "sanitize_urls": true,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["row"], 2);
    assert_eq!(body["errors"][0]["field"], "name");

    let count = product::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_commit_rejects_malformed_json_with_400() {
    let (app, _db) = setup_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/import",
        Some(json!({ "format": "json", "content": "{\"name\": \"not an array\"}" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("array"));
}

#[tokio::test]
async fn test_commit_then_browse_catalog() {
    let (app, _db) = setup_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/import",
        Some(json!({
            "format": "json",
            "content": r#"[
                {"name":"Heater","price":"29.99","quantity":"3","category":"heating"},
                {"name":"Wavemaker","price":59,"category":"flow",
                 "amazon_url":"https://www.amazon.com/Wave/dp/B08WAVE123?th=1"}
            ]"#,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["imported"], 2);
    assert_eq!(body["affiliate_links"], 1);

    let (status, body) = send(&app, "GET", "/products?category=flow", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    let wavemaker = &body["products"][0];
    assert_eq!(
        wavemaker["amazon_url"],
        "https://www.amazon.com/dp/B08WAVE123?tag=travisdraga07-20"
    );

    let id = wavemaker["id"].as_i64().unwrap();
    let (status, link) = send(&app, "GET", &format!("/products/{}/affiliate-link", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["asin"], "B08WAVE123");

    let (status, heater) = send(&app, "GET", "/products?q=Heat", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(heater["products"][0]["regular_price"], 29.99);
    assert_eq!(heater["products"][0]["stock_quantity"], 3);
    assert_eq!(heater["products"][0]["sale_price"], Value::Null);
}

#[tokio::test]
async fn test_bulk_visibility_and_missing_product() {
    let (app, _db) = setup_test_app().await;
    send(
        &app,
        "POST",
        "/import",
        Some(json!({
            "format": "csv",
            "content": "name\nAir Stone\nCheck Valve\n",
        })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/products", None).await;
    let ids: Vec<i64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);

    let (status, report) = send(
        &app,
        "POST",
        "/products/visibility",
        Some(json!({ "ids": ids, "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["updated"], 2);

    let (_, active) = send(&app, "GET", "/products?active=true", None).await;
    assert_eq!(active["total"], 0);

    let (status, partial) = send(
        &app,
        "POST",
        "/products/visibility",
        Some(json!({ "ids": [ids[0], 9999, ids[1]], "is_featured": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(partial["updated"], 1);
    assert_eq!(partial["failed_id"], 9999);

    let (status, _) = send(&app, "GET", "/products/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/products/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/products/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_maintenance_suggestions_flow() {
    let (app, _db) = setup_test_app().await;

    let (status, filter) = send(
        &app,
        "POST",
        "/equipment",
        Some(json!({
            "aquarium_id": 7,
            "name": "Fluval 407",
            "equipment_type": "filter",
            "installed_at": "2024-03-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let filter_id = filter["id"].as_i64().unwrap();

    let (status, heater) = send(
        &app,
        "POST",
        "/equipment",
        Some(json!({
            "aquarium_id": 7,
            "name": "Eheim Jager",
            "equipment_type": "heater",
            "installed_at": "2024-05-20"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let heater_id = heater["id"].as_i64().unwrap();

    for (kind, title, days) in [("filter", "Rinse filter media", 30), ("heater", "Check heater calibration", 90)] {
        let (status, _) = send(
            &app,
            "POST",
            "/maintenance/templates",
            Some(json!({ "equipment_type": kind, "title": title, "frequency_days": days })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        "GET",
        "/maintenance/suggestions?aquarium_id=7&today=2024-06-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["equipment_id"].as_i64(), Some(filter_id));
    assert_eq!(suggestions[0]["urgency"], "overdue");
    assert_eq!(suggestions[1]["equipment_id"].as_i64(), Some(heater_id));
    assert_eq!(suggestions[1]["urgency"], "scheduled");

    // Servicing the filter resets its clock
    let (status, task) = send(
        &app,
        "POST",
        "/maintenance/tasks",
        Some(json!({
            "aquarium_id": 7,
            "equipment_id": filter_id,
            "title": "Rinse filter media"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "pending");

    let (status, body) = send(
        &app,
        "GET",
        "/maintenance/suggestions?aquarium_id=7&today=2024-06-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 1);

    let task_id = task["id"].as_i64().unwrap();
    let (status, done) = send(
        &app,
        "PUT",
        &format!("/maintenance/tasks/{}/complete", task_id),
        Some(json!({ "completed_at": "2024-05-30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");

    let (_, body) = send(
        &app,
        "GET",
        "/maintenance/suggestions?aquarium_id=7&today=2024-06-01",
        None,
    )
    .await;
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    let rinse = suggestions
        .iter()
        .find(|s| s["equipment_id"].as_i64() == Some(filter_id))
        .unwrap();
    assert_eq!(rinse["days_since_last"], 2);
    assert_eq!(rinse["urgency"], "scheduled");
}

#[tokio::test]
async fn test_maintenance_validation_errors() {
    let (app, _db) = setup_test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/maintenance/templates",
        Some(json!({ "equipment_type": "filter", "title": "Never", "frequency_days": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/maintenance/templates",
        Some(json!({ "equipment_type": "filter", "title": "Someday", "frequency_days": 100_000_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/equipment",
        Some(json!({
            "aquarium_id": 1,
            "name": "Heater",
            "equipment_type": "heater",
            "installed_at": "last spring"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/maintenance/tasks/404/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "GET",
        "/maintenance/suggestions?aquarium_id=1&today=tomorrow",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
