//! Session endpoints under `/alumnos/{id}/session`.
//!
//! Each endpoint owns its own error mapping: `login` tells an unknown student
//! (404) from a wrong password (400), `verify` answers every rejection with
//! the same 400, and `logout` reports a missing session as 404.

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    error_response, internal_error, message_response, parse_student_id,
    types::{ErrorResponse, LoginRequest, LoginResponse, MessageResponse, SessionRequest},
};
use crate::session::{SessionError, SessionService, token::is_blank};

#[utoipa::path(
    post,
    path = "/alumnos/{id}/session/login",
    params(("id" = u32, Path, description = "Student id")),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 400, description = "Invalid id, body or password", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    ),
    tag = "session"
)]
#[instrument(skip(service, payload))]
pub async fn login(
    Path(id): Path<String>,
    service: Extension<Arc<SessionService>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(student_id) => student_id,
        Err(response) => return response,
    };

    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid JSON body");
    };

    if is_blank(&request.password) {
        return error_response(StatusCode::BAD_REQUEST, "password is required");
    }

    match service.login(student_id, &request.password).await {
        Ok(session) => (
            StatusCode::OK,
            Json(LoginResponse {
                session_string: session.token,
            }),
        )
            .into_response(),
        Err(err) => login_error(&err),
    }
}

#[utoipa::path(
    post,
    path = "/alumnos/{id}/session/verify",
    params(("id" = u32, Path, description = "Student id")),
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session is active", body = MessageResponse),
        (status = 400, description = "Invalid or inactive session", body = ErrorResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    ),
    tag = "session"
)]
#[instrument(skip(service, payload))]
pub async fn verify(
    Path(id): Path<String>,
    service: Extension<Arc<SessionService>>,
    payload: Option<Json<SessionRequest>>,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(student_id) => student_id,
        Err(response) => return response,
    };

    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid JSON body");
    };

    match service.verify(student_id, &request.session_string).await {
        Ok(()) => message_response(StatusCode::OK, "session is valid"),
        Err(err) => verify_error(&err),
    }
}

#[utoipa::path(
    post,
    path = "/alumnos/{id}/session/logout",
    params(("id" = u32, Path, description = "Student id")),
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session closed", body = MessageResponse),
        (status = 400, description = "Invalid input or session owned by another student", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    ),
    tag = "session"
)]
#[instrument(skip(service, payload))]
pub async fn logout(
    Path(id): Path<String>,
    service: Extension<Arc<SessionService>>,
    payload: Option<Json<SessionRequest>>,
) -> Response {
    let student_id = match parse_student_id(&id) {
        Ok(student_id) => student_id,
        Err(response) => return response,
    };

    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid JSON body");
    };

    match service.logout(student_id, &request.session_string).await {
        Ok(()) => message_response(StatusCode::OK, "session closed"),
        Err(err) => logout_error(&err),
    }
}

fn login_error(err: &SessionError) -> Response {
    match err {
        SessionError::NotFound => error_response(StatusCode::NOT_FOUND, "student not found"),
        SessionError::Unauthorized => error_response(StatusCode::BAD_REQUEST, "incorrect password"),
        SessionError::InvalidInput(reason) => error_response(StatusCode::BAD_REQUEST, reason),
        _ => internal_error(err),
    }
}

fn verify_error(err: &SessionError) -> Response {
    match err {
        err if err.is_domain() => {
            debug!("Session rejected: {err}");
            error_response(StatusCode::BAD_REQUEST, "invalid or inactive session")
        }
        _ => internal_error(err),
    }
}

fn logout_error(err: &SessionError) -> Response {
    match err {
        SessionError::NotFound => error_response(StatusCode::NOT_FOUND, "session not found"),
        SessionError::Unauthorized => error_response(
            StatusCode::BAD_REQUEST,
            "session does not belong to this student",
        ),
        SessionError::InvalidInput(reason) => error_response(StatusCode::BAD_REQUEST, reason),
        _ => internal_error(err),
    }
}
