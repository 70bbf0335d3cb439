//! Integration tests for the `/projects` endpoints.

mod common;

use axum::http::StatusCode;
use civiclink_core::roles::Role;
use common::{body_json, TestApp};
use serde_json::json;
use uuid::Uuid;

fn project(title: &str, category: &str, progress: Option<i16>) -> serde_json::Value {
    json!({
        "title": title,
        "category": category,
        "short_description": "Ward works",
        "cost": 45_000_000,
        "ward": 112,
        "start_date": "2024-01-15",
        "completion_date": "2024-10-30",
        "duration_months": 9,
        "progress_percent": progress,
        "geo_location": { "lat": 12.9141, "lng": 77.6387 },
        "images": ["site-1.jpg"],
    })
}

async fn seed(app: &TestApp, admin: &str, body: serde_json::Value) -> serde_json::Value {
    let response = app.post("/api/v1/projects", Some(admin), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[tokio::test]
async fn admin_creates_and_anyone_reads() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;
    let created = seed(&app, &admin, project("Sewage Line Repair", "Drainage", Some(60))).await;

    let response = app
        .get(&format!("/api/v1/projects/{}", created["id"].as_str().unwrap()), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Sewage Line Repair");
    assert_eq!(json["data"]["geo_location"]["lat"], 12.9141);
}

#[tokio::test]
async fn non_admin_cannot_create() {
    let app = TestApp::new();
    let (_, official) = app.user_with_role(Role::Official).await;

    let response = app
        .post("/api/v1/projects", Some(&official), project("Park", "Parks", None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post("/api/v1/projects", None, project("Park", "Parks", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_project_is_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;

    let response = app
        .post("/api/v1/projects", Some(&admin), project("Flyover", "Flyover", Some(120)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_filters_and_sorts() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;
    seed(&app, &admin, project("Storm Drain Koramangala", "Drainage", Some(10))).await;
    seed(&app, &admin, project("Public Park Development", "Parks", Some(40))).await;
    seed(&app, &admin, project("Sewage Line Koramangala", "drainage", Some(60))).await;
    seed(&app, &admin, project("Drain Survey Koramangala", "Drainage", None)).await;

    let response = app
        .get("/api/v1/projects?category=DRAINAGE&title=koramangala&sort=progress", None)
        .await;
    let titles: Vec<String> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Sewage Line Koramangala",
            "Storm Drain Koramangala",
            "Drain Survey Koramangala",
        ]
    );

    let response = app.get("/api/v1/projects?category=all", None).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 4);

    let response = app.get("/api/v1/projects?sort=cost", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_project_returns_404() {
    let app = TestApp::new();
    let response = app
        .get(&format!("/api/v1/projects/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
