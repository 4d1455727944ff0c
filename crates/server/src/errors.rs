use crate::session::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contentgen::GenerationError;
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors from the per-session generation and download flow.
    Session(SessionError),
    /// Malformed input that never reached the session, such as an unknown content type.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

/// The HTTP status for a session failure.
pub fn status_for(err: &SessionError) -> StatusCode {
    match err {
        SessionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Busy => StatusCode::CONFLICT,
        SessionError::Generation(gen_err) => match gen_err {
            GenerationError::MissingCredential => StatusCode::UNAUTHORIZED,
            GenerationError::GenerationFailed(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            GenerationError::GenerationFailed(_) | GenerationError::EmptyResponse => {
                StatusCode::BAD_GATEWAY
            }
        },
        SessionError::Superseded => StatusCode::CONFLICT,
        SessionError::NoContent => StatusCode::NOT_FOUND,
        SessionError::Render(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Session(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!("SessionError: {:?}", err);
                } else {
                    warn!("SessionError: {}", err);
                }
                (status, err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
