//! Public informational endpoints

use crate::catalog::{COMPANY, SERVICES};
use crate::models::HealthStatus;
use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy",
        service: "Etana Interiors API",
    })
}

/// Service catalog shown in the services gallery and the form's dropdown
pub async fn list_services() -> impl IntoResponse {
    Json(json!({ "services": SERVICES }))
}

pub async fn company_info() -> impl IntoResponse {
    Json(COMPANY)
}
