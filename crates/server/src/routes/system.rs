use actix_web::{get, web, HttpResponse};
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;
use crate::types::HealthResponse;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Upload form
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Liveness plus generation service reachability
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let generation_service = match state.client.test_connection().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!("Generation service check failed: {}", e);
            false
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: state.client.model().to_string(),
        generation_service,
    })
}
