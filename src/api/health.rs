use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::{database::Store, state::AppState};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub storage: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Liveness banner", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Backend is working!")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and storage are healthy", body = HealthResponse),
        (status = 503, description = "Storage backend does not answer", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, mut response) = match state.store.ping().await {
        Ok(()) => ("healthy", HttpResponse::Ok()),
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            ("degraded", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.store.backend_name().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
