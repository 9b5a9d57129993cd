use crate::GIT_COMMIT_HASH;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgPool};
use tracing::{Instrument, debug, error, info_span};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Database is healthy", body = [Health]),
        (status = 503, description = "Database is unhealthy", body = [Health])
    ),
    tag= "health"
)]
// axum handler for health
pub async fn health(method: Method, pool: Option<Extension<PgPool>>) -> impl IntoResponse {
    // Routers built over in-memory stores carry no pool.
    let database = match pool {
        Some(Extension(pool)) => ping(&pool).await,
        None => DatabaseStatus::Disabled,
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.as_str().to_string(),
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let headers = format!("{}:{}:{}", health.name, health.version, short_hash)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();

            headers.insert("X-App", x_app_header_value);

            headers
        })
        .unwrap_or_else(|err| {
            error!("Failed to parse X-App header: {}", err);

            HeaderMap::new()
        });

    if database == DatabaseStatus::Error {
        (StatusCode::SERVICE_UNAVAILABLE, headers, body)
    } else {
        (StatusCode::OK, headers, body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatabaseStatus {
    Ok,
    Error,
    Disabled,
}

impl DatabaseStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
            Self::Disabled => "disabled",
        }
    }
}

async fn ping(pool: &PgPool) -> DatabaseStatus {
    let acquire_span = info_span!(
        "db.acquire",
        db.system = "postgresql",
        db.operation = "ACQUIRE"
    );
    match pool.acquire().instrument(acquire_span).await {
        Ok(mut conn) => {
            let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
            match conn.ping().instrument(ping_span).await {
                Ok(()) => {
                    debug!("Database connection is healthy");

                    DatabaseStatus::Ok
                }
                Err(error) => {
                    error!("Failed to ping database: {}", error);

                    DatabaseStatus::Error
                }
            }
        }

        Err(error) => {
            error!("Failed to acquire database connection: {}", error);

            DatabaseStatus::Error
        }
    }
}
