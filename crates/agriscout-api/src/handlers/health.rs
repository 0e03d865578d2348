use axum::{response::IntoResponse, Json};

use crate::dto::{HealthResponse, ServiceInfo};

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::default())
}

pub async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo::default())
}
