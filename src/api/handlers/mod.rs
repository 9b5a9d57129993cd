//! API handlers and shared response helpers.

pub mod health;
pub mod root;
pub mod session;
pub mod types;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::session::{SessionError, StudentId};
use types::{ErrorResponse, MessageResponse};

/// `{"error": "..."}` with the given status.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// `{"message": "..."}` with the given status.
pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Log the real cause and answer with an opaque 500.
pub(crate) fn internal_error(err: &SessionError) -> Response {
    error!("Internal failure: {err}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// Student ids in paths are unsigned 32-bit decimals.
pub(crate) fn parse_student_id(raw: &str) -> Result<StudentId, Response> {
    raw.parse::<StudentId>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "invalid id"))
}
