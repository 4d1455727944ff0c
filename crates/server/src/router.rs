use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/generate", post(handlers::generate_form_handler))
        .route("/reset", post(handlers::reset_form_handler))
        .route("/credential", post(handlers::credential_handler))
        .route("/download", get(handlers::download_handler))
        .route("/api/generate", post(handlers::generate_api_handler))
        .route("/api/reset", post(handlers::reset_api_handler))
        .route("/api/session", get(handlers::session_api_handler))
        .route(
            "/api/content-types",
            get(handlers::content_types_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
