use std::sync::Arc;

use axum::{
    Json, Router,
    routing::get,
};
use serde_json::json;

use availability_cell::router::availability_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let configured = state.is_configured();

    Router::new()
        .route("/", get(|| async { "Physio Clinic API is running!" }))
        .route("/health", get(move || async move {
            Json(json!({ "status": "ok", "configured": configured }))
        }))
        .merge(availability_routes(state.clone()))
        // Path the web client used for the hosted edge functions
        .nest("/functions/v1", availability_routes(state))
}
