use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Welcome to the Casecraft API" }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
