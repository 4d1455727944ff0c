//! # Document Route Handlers
//!
//! Serves the session's stored content as a freshly rendered PDF.

use super::{session_for, AppError, AppState};
use crate::session::lock;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use contentgen_pdf::RenderedDocument;
use tracing::info;

/// Handles `GET /download`.
///
/// Responds with `404` when the session holds no generated content and `422`
/// when the content contains characters the PDF font cannot encode.
pub async fn download_handler(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, handle) = session_for(&app_state, jar);
    let rendered = lock(&handle).render_download();

    let response = match rendered {
        Ok((file_name, document)) => {
            info!(%file_name, pages = document.page_count, "Serving PDF download.");
            (
                [
                    (header::CONTENT_TYPE, RenderedDocument::MEDIA_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{file_name}\""),
                    ),
                ],
                document.bytes,
            )
                .into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    };
    (jar, response).into_response()
}
