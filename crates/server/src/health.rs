use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct HealthStatus {
    status: &'static str,
}

pub(crate) async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
