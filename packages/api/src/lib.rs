// ABOUTME: HTTP API layer for Lendflow providing REST endpoints and routing
// ABOUTME: Deal ingestion and lending API proxy routes over shared application state

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod deals_handlers;
pub mod error;
pub mod health;
pub mod middleware;
pub mod pagination;
pub mod state;

pub use error::{ApiResult, AppError};
pub use state::AppState;

/// Creates the deals API router (nested under /api/deals)
pub fn create_deals_router() -> Router<AppState> {
    Router::new()
        .route("/", get(deals_handlers::list_deals))
        .route("/", post(deals_handlers::create_deal))
        .route("/{id}", get(deals_handlers::get_deal))
        .route("/{id}", put(deals_handlers::update_deal))
}

/// Creates the full API router
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/deals", create_deals_router());

    middleware::with_panic_boundary(routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
