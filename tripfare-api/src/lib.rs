use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod error;
pub mod results;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The results page is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(results::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
