//! Integration tests for role lookup and administration.

mod common;

use axum::http::StatusCode;
use civiclink_core::roles::Role;
use common::{body_json, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn me_role_reports_none_without_grants() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app.get("/api/v1/me/role", Some(&app.token(user))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "none");
    assert_eq!(json["data"]["user_id"], user.to_string());
    assert!(json["data"]["grants"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn me_role_requires_a_token() {
    let app = TestApp::new();
    let response = app.get("/api/v1/me/role", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_grants_take_effect_immediately() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;
    let (user, user_token) = app.user_with_role(Role::Citizen).await;

    let response = app
        .put(
            &format!("/api/v1/admin/roles/{user}"),
            Some(&admin),
            json!({ "role": "official" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "official");
    assert_eq!(json["data"]["grants"], json!(["citizen", "official"]));

    // The same token now carries the new role.
    let response = app.get("/api/v1/me/role", Some(&user_token)).await;
    assert_eq!(body_json(response).await["data"]["role"], "official");

    let response = app
        .delete(&format!("/api/v1/admin/roles/{user}/official"), Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/v1/admin/roles/{user}"), Some(&admin))
        .await;
    assert_eq!(body_json(response).await["data"]["role"], "citizen");

    let response = app
        .delete(&format!("/api/v1/admin/roles/{user}/official"), Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admins_cannot_manage_roles() {
    let app = TestApp::new();
    let (_, official) = app.user_with_role(Role::Official).await;
    let target = Uuid::new_v4();

    let response = app
        .put(
            &format!("/api/v1/admin/roles/{target}"),
            Some(&official),
            json!({ "role": "admin" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Not permitted");

    let response = app
        .get(&format!("/api/v1/admin/roles/{target}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_role_names_are_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.user_with_role(Role::Admin).await;

    let response = app
        .put(
            &format!("/api/v1/admin/roles/{}", Uuid::new_v4()),
            Some(&admin),
            json!({ "role": "mayor" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
