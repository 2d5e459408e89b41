use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod client;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod stats;

use db::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

fn questionnaire_routes() -> Router<AppState> {
    Router::new()
        .route("/submit", post(handlers::questionnaire::submit))
        .route("/results", post(handlers::questionnaire::results))
        .route("/summary", get(handlers::questionnaire::summary))
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // Browser and terminal clients call the /api-prefixed paths.
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(questionnaire_routes())
        .nest("/api", questionnaire_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
