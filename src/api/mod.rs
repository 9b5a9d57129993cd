use crate::{
    api::handlers::{health, root, session},
    session::{SessionConfig, SessionService},
    storage::{self, PgSessionStore, PgStudentDirectory},
};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Method, Request, header::CONTENT_TYPE},
    routing::{get, post},
};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug, info, info_span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
mod openapi;

pub use openapi::openapi;

/// Build the HTTP router over an already wired [`SessionService`].
///
/// The database pool is not part of the router; `/health` reports it only when
/// an `Extension<PgPool>` layer is added on top.
#[must_use]
pub fn router(service: Arc<SessionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route("/alumnos/:id/session/login", post(session::login))
        .route("/alumnos/:id/session/verify", post(session::verify))
        .route("/alumnos/:id/session/logout", post(session::logout))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(service)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to connect to the database or to start the server
pub async fn new(
    port: u16,
    dsn: SecretString,
    max_connections: u32,
    config: SessionConfig,
) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(max_connections)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(dsn.expose_secret())
        .await
        .context("Failed to connect to database")?;

    storage::apply_schema(&pool).await?;

    let service = Arc::new(SessionService::new(
        Arc::new(PgSessionStore::new(pool.clone())),
        Arc::new(PgStudentDirectory::new(pool.clone())),
        config,
    ));

    debug!(
        store_timeout = ?service.config().store_timeout(),
        "Session service ready"
    );

    let app = router(service).layer(Extension(pool));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", err);
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
