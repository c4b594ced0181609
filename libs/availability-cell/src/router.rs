// libs/availability-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use shared_config::AppConfig;

use crate::handlers;

pub fn availability_routes(state: Arc<AppConfig>) -> Router {
    // Answers OPTIONS preflight for every route below
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/check-availability", post(handlers::check_availability))
        .route("/day-schedule", get(handlers::get_day_schedule))
        .layer(cors)
        .with_state(state)
}
