use super::handlers::{health, session, types};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        session::login,
        session::verify,
        session::logout,
    ),
    components(schemas(
        health::Health,
        types::LoginRequest,
        types::LoginResponse,
        types::SessionRequest,
        types::MessageResponse,
        types::ErrorResponse,
    )),
    tags(
        (name = "session", description = "Student login, session verification and logout"),
        (name = "health", description = "Service and database status"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document for every served endpoint except `/`.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
