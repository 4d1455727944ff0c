//! # General Route Handlers
//!
//! The page itself, the health check and the read-only JSON endpoints.

use super::{session_for, ApiResponse, AppState};
use crate::{
    page::render_page,
    session::lock,
    types::{ContentTypeInfo, SessionView},
};
use axum::{extract::State, response::Html, Json};
use axum_extra::extract::cookie::CookieJar;
use contentgen::ContentType;

/// The handler for the root (`/`) endpoint: the content form and preview.
///
/// A pending notice is shown once and then cleared.
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, handle) = session_for(&app_state, jar);
    let view = {
        let mut session = lock(&handle);
        let view = SessionView::from_session(&session);
        session.take_notice();
        view
    };
    let show_key_entry = !app_state.generator.resolver().has_managed_credential();
    (jar, Html(render_page(&view, show_key_entry)))
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Lists the selectable content types, in selector order.
pub async fn content_types_handler() -> Json<ApiResponse<Vec<ContentTypeInfo>>> {
    let result = ContentType::ALL.into_iter().map(ContentTypeInfo::from).collect();
    Json(ApiResponse { result })
}

/// Reports the caller's session, including whether a generation is in flight.
pub async fn session_api_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<SessionView>>) {
    let (jar, handle) = session_for(&app_state, jar);
    let view = SessionView::from_session(&lock(&handle));
    (jar, Json(ApiResponse { result: view }))
}
