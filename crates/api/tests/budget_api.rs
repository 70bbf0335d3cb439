//! Integration tests for the `/budget` endpoints.

mod common;

use axum::http::StatusCode;
use civiclink_core::roles::Role;
use common::{body_json, TestApp};
use serde_json::json;

fn flow(fiscal_year: &str) -> serde_json::Value {
    json!({
        "fiscal_year": fiscal_year,
        "bbmp_budget": 11_163_000_000_i64,
        "state_funds": 3_000_000_000_i64,
        "central_funds": 1_200_000_000_i64,
        "category_wise_breakdown": [
            { "name": "Roads & Infrastructure", "percent": 35.0 },
            { "name": "Waste Management", "percent": 18.0 },
            { "name": "Water & Sanitation", "percent": 22.0 },
        ],
    })
}

#[tokio::test]
async fn admin_seeds_a_fiscal_year() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;

    let response = app.post("/api/v1/budget", Some(&admin), flow("2023-24")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fiscal_year"], "2023-24");
    assert_eq!(json["data"]["total_funds"], 15_363_000_000_i64);
    assert_eq!(json["data"]["total_funds_display"], "₹1536.3 Crore");

    let response = app.get("/api/v1/budget/2023-24", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["category_wise_breakdown"].as_array().unwrap().len(),
        3
    );
}

#[tokio::test]
async fn duplicate_fiscal_year_conflicts() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;

    app.post("/api/v1/budget", Some(&admin), flow("2023-24")).await;
    let response = app.post("/api/v1/budget", Some(&admin), flow("2023-24")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_is_latest_year_first() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;
    for year in ["2022-23", "2024-25", "2023-24"] {
        app.post("/api/v1/budget", Some(&admin), flow(year)).await;
    }

    let response = app.get("/api/v1/budget", None).await;
    let years: Vec<String> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["fiscal_year"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(years, vec!["2024-25", "2023-24", "2022-23"]);
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;

    let response = app.post("/api/v1/budget", Some(&admin), flow("2023-25")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut over = flow("2023-24");
    over["category_wise_breakdown"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "name": "Health", "percent": 30.0 }));
    let response = app.post("/api/v1/budget", Some(&admin), over).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, citizen) = app.user_with_role(Role::Citizen).await;
    let response = app.post("/api/v1/budget", Some(&citizen), flow("2023-24")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn lookup_validates_then_finds() {
    let app = TestApp::new();

    let response = app.get("/api/v1/budget/FY2023", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/v1/budget/2030-31", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
