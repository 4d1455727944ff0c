//! # Session Control Handlers

use super::{session_for, ApiResponse, AppState};
use crate::{
    session::lock,
    types::{CredentialForm, SessionView},
};
use axum::{extract::State, response::Redirect, Form, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

/// Handles `POST /reset` from the HTML form.
pub async fn reset_form_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let (jar, handle) = session_for(&app_state, jar);
    lock(&handle).reset();
    info!("Session reset.");
    (jar, Redirect::to("/"))
}

/// Handles `POST /api/reset` and returns the cleared session.
pub async fn reset_api_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<SessionView>>) {
    let (jar, handle) = session_for(&app_state, jar);
    let view = {
        let mut session = lock(&handle);
        session.reset();
        SessionView::from_session(&session)
    };
    info!("Session reset.");
    (jar, Json(ApiResponse { result: view }))
}

/// Handles `POST /credential`: caches a manually entered API key in the session.
///
/// The key is only consulted when neither the secrets file nor the environment
/// provides one.
pub async fn credential_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialForm>,
) -> (CookieJar, Redirect) {
    let (jar, handle) = session_for(&app_state, jar);
    lock(&handle).set_credential(&form.api_key);
    info!("Session API key updated.");
    (jar, Redirect::to("/"))
}
