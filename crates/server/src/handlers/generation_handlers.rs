//! # Generation Route Handlers
//!
//! Both handlers run the same submission through the caller's session. The
//! form handler redirects back to the page, which shows the result or the
//! failure notice; the JSON handler answers with the content or a typed error.

use super::{parse_content_type, session_for, ApiResponse, AppError, AppState};
use crate::{
    session::{self, lock, Notice},
    types::GenerateForm,
};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use contentgen::GeneratedContent;
use tracing::info;

/// Handles `POST /generate` from the HTML form.
pub async fn generate_form_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<GenerateForm>,
) -> (CookieJar, Redirect) {
    let (jar, handle) = session_for(&app_state, jar);

    let content_type = match parse_content_type(form.content_type.as_deref()) {
        Ok(content_type) => content_type,
        Err(e) => {
            lock(&handle).set_notice(Notice::Error(e.to_string()));
            return (jar, Redirect::to("/"));
        }
    };

    info!(%content_type, "Received generation form.");
    // Failures are already recorded on the session as a notice.
    let _ = session::submit(
        &app_state.generator,
        &handle,
        content_type,
        &form.sector,
        &form.topic,
    )
    .await;

    (jar, Redirect::to("/"))
}

/// Handles `POST /api/generate` with a JSON body.
pub async fn generate_api_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<GenerateForm>,
) -> Response {
    let (jar, handle) = session_for(&app_state, jar);
    let result = generate_json(&app_state, &handle, payload).await;
    (jar, result).into_response()
}

async fn generate_json(
    app_state: &AppState,
    handle: &session::SessionHandle,
    payload: GenerateForm,
) -> Result<Json<ApiResponse<GeneratedContent>>, AppError> {
    let content_type = parse_content_type(payload.content_type.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    info!(%content_type, "Received generation request.");

    let outcome = session::submit(
        &app_state.generator,
        handle,
        content_type,
        &payload.sector,
        &payload.topic,
    )
    .await;
    // The response carries the outcome, so the page need not repeat it.
    lock(handle).take_notice();

    Ok(Json(ApiResponse { result: outcome? }))
}
