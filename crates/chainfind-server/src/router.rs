//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: permissive CORS, request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/posts",
            get(handlers::list_posts).post(handlers::save_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post).delete(handlers::delete_post),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
