//! HTTP handlers for pos-sync-service.

pub mod invoices;
pub mod users;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "pos-sync-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
