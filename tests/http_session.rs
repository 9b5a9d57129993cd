//! HTTP contract of the session endpoints, driven through the axum router
//! with in-process stores.

use anyhow::{Context, Result};
use aula::{
    api,
    session::{
        MemorySessionStore, MemoryStudentDirectory, SessionConfig, SessionService,
        password::hash_password,
    },
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> Result<Router> {
    let students = Arc::new(MemoryStudentDirectory::new());
    students.insert(7, hash_password("secret123")?).await;
    students.insert(8, hash_password("otra-clave")?).await;

    let service = Arc::new(SessionService::new(
        Arc::new(MemorySessionStore::new()),
        students,
        SessionConfig::new(),
    ));

    Ok(api::router(service))
}

async fn send(app: &Router, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let request = Request::builder().method("POST").uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => request.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body is not JSON")?
    };

    Ok((status, value))
}

async fn login(app: &Router, id: u32, password: &str) -> Result<String> {
    let (status, body) = send(
        app,
        &format!("/alumnos/{id}/session/login"),
        Some(json!({ "password": password })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    body["sessionString"]
        .as_str()
        .map(str::to_string)
        .context("missing sessionString")
}

#[tokio::test]
async fn login_verify_logout_over_http() -> Result<()> {
    let app = app().await?;

    let token = login(&app, 7, "secret123").await?;
    assert_eq!(token.len(), 128);

    let (status, body) = send(
        &app,
        "/alumnos/7/session/verify",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(
        &app,
        "/alumnos/7/session/logout",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "/alumnos/7/session/verify",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Logging out again still succeeds.
    let (status, _) = send(
        &app,
        "/alumnos/7/session/logout",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_status_codes() -> Result<()> {
    let app = app().await?;

    let cases = [
        ("/alumnos/7/session/login", Some(json!({ "password": "wrong" })), StatusCode::BAD_REQUEST),
        ("/alumnos/99/session/login", Some(json!({ "password": "secret123" })), StatusCode::NOT_FOUND),
        ("/alumnos/abc/session/login", Some(json!({ "password": "secret123" })), StatusCode::BAD_REQUEST),
        ("/alumnos/-1/session/login", Some(json!({ "password": "secret123" })), StatusCode::BAD_REQUEST),
        ("/alumnos/7/session/login", Some(json!({ "password": "   " })), StatusCode::BAD_REQUEST),
        ("/alumnos/7/session/login", Some(json!({})), StatusCode::BAD_REQUEST),
        ("/alumnos/7/session/login", None, StatusCode::BAD_REQUEST),
    ];

    for (uri, body, expected) in cases {
        let (status, response) = send(&app, uri, body.clone()).await?;
        assert_eq!(status, expected, "{uri} {body:?} -> {response}");
        assert!(response["error"].is_string(), "{uri} {body:?} -> {response}");
    }
    Ok(())
}

#[tokio::test]
async fn verify_never_reveals_why_a_session_is_rejected() -> Result<()> {
    let app = app().await?;
    let token = login(&app, 7, "secret123").await?;

    let mut errors = Vec::new();
    for (uri, body) in [
        // another student's token
        ("/alumnos/8/session/verify", json!({ "sessionString": token })),
        // unknown token
        ("/alumnos/7/session/verify", json!({ "sessionString": "f".repeat(128) })),
        // blank token
        ("/alumnos/7/session/verify", json!({ "sessionString": "" })),
    ] {
        let (status, response) = send(&app, uri, Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        errors.push(response["error"].clone());
    }

    // another student's token after its owner closed it
    let (status, _) = send(
        &app,
        "/alumnos/7/session/logout",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = send(
        &app,
        "/alumnos/8/session/verify",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    errors.push(response["error"].clone());

    assert!(errors.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[tokio::test]
async fn logout_status_codes() -> Result<()> {
    let app = app().await?;
    let token = login(&app, 7, "secret123").await?;

    let (status, _) = send(
        &app,
        "/alumnos/7/session/logout",
        Some(json!({ "sessionString": "a".repeat(128) })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "/alumnos/8/session/logout",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "/alumnos/7/session/logout",
        Some(json!({ "sessionString": "  " })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The rejected foreign logout left the session open.
    let (status, _) = send(
        &app,
        "/alumnos/7/session/verify",
        Some(json!({ "sessionString": token })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> Result<()> {
    let app = app().await?;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .context("missing x-request-id")?;
    assert_eq!(request_id.len(), 26);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "caller-supplied")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok()),
        Some("caller-supplied")
    );
    Ok(())
}

#[tokio::test]
async fn serves_openapi_document() -> Result<()> {
    let app = app().await?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let doc: Value = serde_json::from_slice(&bytes)?;
    assert!(doc["paths"]["/alumnos/{id}/session/login"].is_object());
    Ok(())
}
