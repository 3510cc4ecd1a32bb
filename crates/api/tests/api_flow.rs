//! End-to-end request flows over the in-memory stores.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use casecraft_api::app::{build_router, services::AppServices};
use casecraft_auth::{NewUser, UserRecord, hash_password};

const ADMIN_PASSWORD: &str = "admin-password";

async fn setup() -> Router {
    let services = Arc::new(AppServices::in_memory(
        b"integration-test-secret",
        Duration::seconds(3600),
    ));

    let new = NewUser::new("admin@example.com", "admin", Some("Admin")).unwrap();
    let hash = hash_password(ADMIN_PASSWORD).unwrap();
    let mut admin = UserRecord::create(new, hash, Utc::now());
    admin.is_admin = true;
    services.users.insert(&admin).await.unwrap();

    build_router(services)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap();
    send(app, req).await
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = login(app, "admin", ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn root_and_health() {
    let app = setup().await;

    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Casecraft"));

    let (status, _) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn register_login_me_flow() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "Carol@Example.com",
                "username": "carol",
                "password": "carol-secret",
                "full_name": "Carol Jones",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "carol@example.com");
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password_hash").is_none());

    let (status, body) = login(&app, "carol", "carol-secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap().to_string();

    let req = Request::get("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "carol");
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn register_rejects_invalid_input_and_duplicates() {
    let app = setup().await;

    // Bad email.
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "not-an-email", "username": "x", "password": "long-enough" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Short password.
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "x@example.com", "username": "x", "password": "short" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Username already taken by the seeded admin.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "other@example.com", "username": "admin", "password": "long-enough" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate");

    // Email already taken.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "admin@example.com", "username": "fresh", "password": "long-enough" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate");
}

#[tokio::test]
async fn login_failures_are_generic_401s() {
    let app = setup().await;

    let (status, body) = login(&app, "admin", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let wrong_password_message = body["message"].clone();

    let (status, body) = login(&app, "no-such-user", "whatever-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // Unknown user and wrong password are indistinguishable.
    assert_eq!(body["message"], wrong_password_message);
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bad_tokens() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        Request::get("/api/auth/me").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    // Tampered token.
    let token = admin_token(&app).await;
    let mut tampered = token.clone();
    tampered.pop();
    tampered.push('x');
    let req = Request::get("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {tampered}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Non-bearer scheme.
    let req = Request::get("/api/auth/me")
        .header(header::AUTHORIZATION, "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Mutations need a token too.
    let (status, _) = send(
        &app,
        json_request("POST", "/api/products", json!({ "name": "x", "price": 1.0, "stock": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_cannot_mutate_products() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "bob@example.com", "username": "bob", "password": "bob-secret-1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "bob", "bob-secret-1").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap();

    let (status, body) = send(
        &app,
        authed_json_request(
            "POST",
            "/api/products",
            token,
            json!({ "name": "Clear Case", "price": 19.99, "stock": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn admin_product_crud() {
    let app = setup().await;
    let token = admin_token(&app).await;

    // Create.
    let (status, created) = send(
        &app,
        authed_json_request(
            "POST",
            "/api/products",
            &token,
            json!({
                "name": "Clear Case",
                "description": "Transparent phone case",
                "price": 19.99,
                "stock": 5,
                "category": "cases",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    // Public list sees it without a token.
    let (status, body) = send(
        &app,
        Request::get("/api/products?category=cases")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Public get by id.
    let (status, body) = send(
        &app,
        Request::get(format!("/api/products/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Clear Case");

    // Partial update only touches the given fields.
    let (status, body) = send(
        &app,
        authed_json_request(
            "PUT",
            &format!("/api/products/{id}"),
            &token,
            json!({ "price": 24.99 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 24.99);
    assert_eq!(body["name"], "Clear Case");
    assert_eq!(body["stock"], 5);

    // Invalid id and unknown id.
    let (status, _) = send(
        &app,
        authed_json_request("PUT", "/api/products/not-a-uuid", &token, json!({ "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ghost = uuid::Uuid::now_v7();
    let (status, _) = send(
        &app,
        authed_json_request(
            "PUT",
            &format!("/api/products/{ghost}"),
            &token,
            json!({ "price": 1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Invalid patch value.
    let (status, _) = send(
        &app,
        authed_json_request(
            "PUT",
            &format!("/api/products/{id}"),
            &token,
            json!({ "price": -1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Delete echoes the removed row, then the id is gone.
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/products/{id}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Clear Case");

    let (status, _) = send(
        &app,
        Request::get(format!("/api/products/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
