//! End-to-end CRUD flow over the in-memory session.
//!
//! Exercises every admin operation through the real router: format
//! negotiation, redirects, validation re-rendering, partial fragments,
//! pagination and the Not-Found taxonomy.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use modelgrid::prelude::*;
use modelgrid::testing::fixtures::Contact;
use serde_json::Value;
use tower::ServiceExt;

fn test_app() -> Router {
    test_app_with_page_size(20)
}

fn test_app_with_page_size(page_size: u64) -> Router {
    let config = AdminConfig {
        root_path: "/admin".into(),
        page_size,
        site_title: "Admin".into(),
    };
    let state = AdminState::builder(config)
        .register::<Contact, _>(MemorySession::new())
        .build();
    Router::new().nest("/admin", modelgrid::handlers::router(state))
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_put(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

async fn create_contact(app: &Router, name: &str) {
    let response = send(app, form_post("/admin/Contact", &format!("name={name}"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// Models index

#[tokio::test]
async fn test_models_index_lists_registered_models() {
    let app = test_app();

    let response = send(&app, get("/admin")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<a href="/admin/Contact">Contact</a>"#));

    let response = send(&app, get("/admin?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"models": {"Contact": "/admin/Contact"}})
    );
}

#[tokio::test]
async fn test_unknown_model_is_404() {
    let app = test_app();
    let response = send(&app, get("/admin/Ghost")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Listing

#[tokio::test]
async fn test_listing_json_empty() {
    let app = test_app();
    let response = send(&app, get("/admin/Contact?format=json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["rows"], serde_json::json!([]));
    assert_eq!(json["records"], 0);
    assert_eq!(json["total"], 1);
    assert_eq!(json["page"], 1);
}

#[tokio::test]
async fn test_listing_html_has_grid_and_action_forms() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("modelgrid-grid"));
    assert!(html.contains("<td>Alice</td>"));
    assert!(html.contains(r#"action="/admin/Contact/1/edit" method="GET""#));
    assert!(html.contains(r#"action="/admin/Contact/1/delete" method="POST""#));
    assert!(html.contains(r#"href="/admin/Contact/new""#));
}

#[tokio::test]
async fn test_listing_respects_page_size_and_reports_totals() {
    let app = test_app_with_page_size(2);
    for name in ["a", "b", "c", "d", "e"] {
        create_contact(&app, name).await;
    }

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["records"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["page"], 1);

    let response = send(&app, get("/admin/Contact?format=json&page=3")).await;
    let json = body_json(response).await;
    assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    assert_eq!(json["page"], 3);

    let response = send(&app, get("/admin/Contact?page=2")).await;
    let html = body_text(response).await;
    assert!(html.contains(r#"<span class="ui-pager-curpage ui-state-highlight ui-corner-all">2</span>"#));
    assert!(html.contains(r#"href="/admin/Contact?page=1""#));
}

#[tokio::test]
async fn test_listing_json_cell_convention() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact?format=json&cells=1")).await;
    let json = body_json(response).await;
    let row = &json["rows"][0];
    assert_eq!(row["id"], "1");
    assert_eq!(row["item_url"], "/admin/Contact/1");
    assert_eq!(row["cell"], serde_json::json!(["1", "1", "Alice", ""]));
}

#[tokio::test]
async fn test_listing_row_fields_and_item_url() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    let row = &json["rows"][0];
    assert_eq!(row["id"], "1");
    assert_eq!(row["item_url"], "/admin/Contact/1");
    assert_eq!(row["name"], "Alice");
    assert_eq!(row["email"], Value::Null);
}

// Create

#[tokio::test]
async fn test_create_valid_redirects_to_collection() {
    let app = test_app();
    let response = send(&app, form_post("/admin/Contact", "name=Alice")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/Contact");

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["records"], 1);
    assert_eq!(json["rows"][0]["name"], "Alice");
}

#[tokio::test]
async fn test_create_follows_next_parameter() {
    let app = test_app();
    let response = send(
        &app,
        form_post("/admin/Contact", "name=Bob&next=/somewhere/else"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/somewhere/else");
}

#[tokio::test]
async fn test_create_invalid_rerenders_form_and_persists_nothing() {
    let app = test_app();
    let response = send(&app, form_post("/admin/Contact", "")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<span class="field-error">required</span>"#));
    assert!(html.contains("<form action=\"/admin/Contact\""));

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["records"], 0);
}

#[tokio::test]
async fn test_create_json_put_returns_synced_fields() {
    let app = test_app();
    let response = send(
        &app,
        json_put(
            "/admin/Contact?format=json",
            &serde_json::json!({"name": "Carla", "email": "carla@example.com"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["name"], "Carla");
    assert_eq!(json["fields"]["id"], 1);
    assert_eq!(json["item_url"], "/admin/Contact/1");
    assert!(json.get("errors").is_none());
}

#[tokio::test]
async fn test_create_json_invalid_reports_errors() {
    let app = test_app();
    let response = send(
        &app,
        json_put(
            "/admin/Contact?format=json",
            &serde_json::json!({"email": "not-an-email"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"], serde_json::json!(["required"]));
    assert!(json["errors"]["email"].is_array());

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["records"], 0);
}

// Show / edit

#[tokio::test]
async fn test_show_renders_readonly_values() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<span class="field-value">Alice</span>"#));
    assert!(!html.contains("<form action="));
    // Instance crumb is labeled by the record's display string.
    assert!(html.contains(r#"<a class="instance_url" href="/admin/Contact/1">Alice</a>"#));
}

#[tokio::test]
async fn test_edit_renders_bound_form() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact/1/edit")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<form action="/admin/Contact/1" method="post""#));
    assert!(html.contains(r#"value="Alice""#));
}

#[tokio::test]
async fn test_show_edit_delete_missing_are_404() {
    let app = test_app();

    let response = send(&app, get("/admin/Contact/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/admin/Contact/999/edit")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, form_post("/admin/Contact/999/delete", "")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, form_post("/admin/Contact/999", "name=x")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Update

#[tokio::test]
async fn test_update_html_redirects_to_item() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, form_post("/admin/Contact/1", "name=Doris")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/Contact/1");

    let response = send(&app, get("/admin/Contact/1")).await;
    let html = body_text(response).await;
    assert!(html.contains("Doris"));
    assert!(!html.contains("Alice"));
}

#[tokio::test]
async fn test_update_empty_submission_is_server_error() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, form_post("/admin/Contact/1", "")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_update_json_status_markers() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(
        &app,
        json_put("/admin/Contact/1?format=json", &serde_json::json!({"name": "Eve"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["fields"]["name"], "Eve");

    let response = send(
        &app,
        json_put("/admin/Contact/1?format=json", &serde_json::json!({"name": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], 1);
    assert_eq!(json["errors"]["name"], serde_json::json!(["required"]));

    // The failed update must not stick.
    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["rows"][0]["name"], "Eve");
}

#[tokio::test]
async fn test_update_html_invalid_rerenders_edit_form() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, form_post("/admin/Contact/1", "name=")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<form action="/admin/Contact/1" method="post""#));
    assert!(html.contains(r#"<span class="field-error">required</span>"#));
}

// Delete

#[tokio::test]
async fn test_delete_redirects_and_removes_record() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, form_post("/admin/Contact/1/delete", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/Contact");

    let response = send(&app, get("/admin/Contact/1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_method_and_json_variant() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/admin/Contact/1?format=json")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"id": "1"}));

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["records"], 0);
}

// Format negotiation and partials

#[tokio::test]
async fn test_unknown_format_is_404() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    for uri in [
        "/admin?format=xml",
        "/admin/Contact?format=xml",
        "/admin/Contact/1?format=xml",
    ] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_accept_header_selects_json() {
    let app = test_app();
    let request = Request::builder()
        .uri("/admin/Contact")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["records"], 0);
}

#[tokio::test]
async fn test_htmx_request_gets_bare_fragment() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let request = Request::builder()
        .uri("/admin/Contact/1/edit")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.starts_with("<fieldset class=\"modelgrid-form\">"));
    assert!(!html.contains("<html"));
}

#[tokio::test]
async fn test_partial_single_field_fragment() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact/1/edit?partial=1&field=name")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="name""#));
    assert!(!html.contains("<fieldset"));

    let response = send(&app, get("/admin/Contact/1/edit?partial=1&field=bogus")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_write_returns_empty_body() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/admin/Contact")
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Alice"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "");

    let response = send(&app, get("/admin/Contact?format=json")).await;
    let json = body_json(response).await;
    assert_eq!(json["records"], 1);
}

#[tokio::test]
async fn test_listing_partial_renders_grid_fragment() {
    let app = test_app();
    create_contact(&app, "Alice").await;

    let response = send(&app, get("/admin/Contact?partial=1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.starts_with("<table class=\"modelgrid-grid\">"));
    assert!(!html.contains("<html"));
}
