//! # Route Handlers
//!
//! This module organizes all the Axum route handlers for the `contentgen-server`.
//! The handlers are split into logical sub-modules: the page and JSON reads,
//! generation, session control and the PDF download.

pub mod document_handlers;
pub mod general;
pub mod generation_handlers;
pub mod session_handlers;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use document_handlers::*;
pub use general::*;
pub use generation_handlers::*;
pub use session_handlers::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, session::SessionHandle, state::AppState, types::ApiResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use contentgen::{types::UnknownContentType, ContentType};

/// The cookie carrying the session id.
pub const SESSION_COOKIE: &str = "contentgen_session";

/// Looks up the caller's session, creating one if the cookie is missing or
/// stale, and returns the jar with the (possibly new) session cookie set.
pub(crate) fn session_for(app_state: &AppState, jar: CookieJar) -> (CookieJar, SessionHandle) {
    let existing = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (id, handle) = app_state.sessions.get_or_create(existing.as_deref());

    let jar = if existing.as_deref() == Some(id.as_str()) {
        jar
    } else {
        jar.add(
            Cookie::build((SESSION_COOKIE, id))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    };
    (jar, handle)
}

/// Parses an optional content-type field. Blank means the default.
pub(crate) fn parse_content_type(raw: Option<&str>) -> Result<ContentType, UnknownContentType> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ContentType::default()),
        Some(value) => value.parse(),
    }
}
