//! Project endpoint contract.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{TestApp, approx};

#[tokio::test]
async fn test_list_seeded_projects_with_derived_fields() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/api/projects").await;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);

    let powerbi = &list[0];
    assert_eq!(powerbi["id"], "powerbi");
    assert_eq!(powerbi["name"], "Power BI");
    assert!(approx(&powerbi["itHours"], 2800.0 / 60.0));
    assert!(approx(&powerbi["itSaving"], 280_000.0 / 60.0));
    assert!(approx(&powerbi["businessSaving"], 4500.0));
    assert!(approx(&powerbi["total"], 9166.666_666_666_666));

    assert_eq!(list[1]["id"], "project2");
}

#[tokio::test]
async fn test_create_without_id_is_400() {
    let app = TestApp::seeded();
    let (status, body) = app
        .post("/api/projects", json!({"name": "Nameless", "count": 3}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "id required"}));
    assert_eq!(app.state.projects.len(), 2);
}

#[tokio::test]
async fn test_create_appends_and_returns_derived() {
    let app = TestApp::seeded();
    let (status, body) = app
        .post(
            "/api/projects",
            json!({
                "id": "my-new-project",
                "name": "My New Project!",
                "count": 60,
                "timePerTransactionMin": 30,
                "businessHoursBack": 2
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "my-new-project");
    assert!(approx(&body["itHours"], 30.0));
    assert!(approx(&body["itSaving"], 3000.0));
    assert!(approx(&body["businessSaving"], 300.0));
    assert!(approx(&body["total"], 3300.0));

    let (_, list) = app.get("/api/projects").await;
    assert_eq!(list[2]["id"], "my-new-project");
    assert_eq!(list[2]["name"], "My New Project!");
}

#[tokio::test]
async fn test_upsert_existing_replaces_in_place() {
    let app = TestApp::seeded();
    let (status, body) = app
        .post("/api/projects", json!({"id": "powerbi", "name": "Power BI v2", "count": 10}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["businessHoursBack"], 0.0));

    let (_, list) = app.get("/api/projects").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Power BI v2");
    assert!(approx(&list[0]["timePerTransactionMin"], 0.0));
}

#[tokio::test]
async fn test_get_single_project() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/api/projects/project2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["businessSaving"], 2250.0));

    let (status, body) = app.get("/api/projects/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "not found"}));
}

#[tokio::test]
async fn test_patch_merges_single_field() {
    let app = TestApp::seeded();
    let (status, body) = app
        .put("/api/projects/powerbi", json!({"businessHoursBack": 10}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Power BI");
    assert!(approx(&body["count"], 200.0));
    assert!(approx(&body["timePerTransactionMin"], 14.0));
    assert!(approx(&body["businessHoursBack"], 10.0));
    assert!(approx(&body["businessSaving"], 1500.0));
}

#[tokio::test]
async fn test_patch_cannot_change_id() {
    let app = TestApp::seeded();
    let (_, body) = app
        .put("/api/projects/powerbi", json!({"id": "hijack"}))
        .await;
    assert_eq!(body["id"], "powerbi");
    assert_eq!(app.state.projects.ids(), vec!["powerbi", "project2"]);
}

#[tokio::test]
async fn test_patch_unknown_is_404() {
    let app = TestApp::seeded();
    let (status, body) = app.put("/api/projects/ghost", json!({"count": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "not found"}));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = TestApp::seeded();

    let (status, body) = app.delete("/api/projects/powerbi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = app.delete("/api/projects/powerbi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, list) = app.get("/api/projects").await;
    let ids: Vec<_> = list.as_array().unwrap().iter().map(|p| p["id"].clone()).collect();
    assert_eq!(ids, vec![json!("project2")]);
}

#[tokio::test]
async fn test_id_with_spaces_is_addressable() {
    let app = TestApp::empty();
    app.post("/api/projects", json!({"id": "two words"})).await;
    let (status, body) = app.get("/api/projects/two%20words").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "two words");
}

#[tokio::test]
async fn test_malformed_json_is_400_with_error_body() {
    use axum::http::Method;

    let app = TestApp::empty();
    let (status, body) = app
        .send(Method::POST, "/api/projects", Some(json!("not an object")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_without_body_is_id_required() {
    use axum::http::Method;

    let app = TestApp::empty();
    let expected = json!({"error": "id required"});

    let (status, body) = app.send(Method::POST, "/api/projects", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    let (status, body) = app
        .send_raw(Method::POST, "/api/projects", Some("application/json"), "")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);
    assert!(app.state.projects.is_empty());
}

#[tokio::test]
async fn test_body_parsed_without_json_content_type() {
    use axum::http::Method;

    let app = TestApp::empty();
    let (status, body) = app
        .send_raw(Method::POST, "/api/projects", Some("text/plain"), r#"{"id":"plain"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "plain");
}

#[tokio::test]
async fn test_unparseable_body_is_400() {
    use axum::http::Method;

    let app = TestApp::empty();
    let (status, body) = app
        .send_raw(Method::POST, "/api/projects", Some("application/json"), "{nope")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));
}

#[tokio::test]
async fn test_blank_name_falls_back_to_id() {
    let app = TestApp::empty();
    let (status, body) = app
        .post("/api/projects", json!({"id": "x", "name": "  ", "count": 1}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "x");

    let (_, list) = app.get("/api/projects").await;
    assert_eq!(list[0]["id"], "x");
    assert_eq!(list[0]["name"], "x");
}

#[tokio::test]
async fn test_summary_totals() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"], 2);
    assert!(approx(&body["businessSaving"], 6750.0));
    assert!(approx(
        &body["total"],
        280_000.0 / 60.0 + 100_000.0 / 60.0 + 6750.0
    ));
}

#[tokio::test]
async fn test_cors_header_present() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let request = Request::get("/api/settings")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = savings_api::router(savings_api::AppState::empty())
        .oneshot(request)
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
