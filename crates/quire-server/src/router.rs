use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all quire endpoints.
pub fn build_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/p/", post(handler::create_document))
        .route(
            "/p/*path",
            get(handler::read_document)
                .put(handler::update_document)
                .delete(handler::delete_document),
        )
        .route("/typeahead", get(handler::typeahead))
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
