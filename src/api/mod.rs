use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::data_models::SearchState;
use crate::refinements::RefinementCatalog;

pub mod handlers;
pub mod models;

pub struct AppState {
    pub catalog: RefinementCatalog,
    pub defaults: SearchState,
}

pub fn create_router(state: Arc<AppState>, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search-params", get(handlers::decode_handler))
        .route("/api/search-params/encode", post(handlers::encode_handler))
        .route("/api/search-params/toggle", post(handlers::toggle_handler))
        .route("/api/refinements", post(handlers::refinements_handler))
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}
