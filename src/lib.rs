//! # Aula (student records and session authentication)
//!
//! `aula` serves the session endpoints of the student records backend. A
//! student (`alumno`) logs in with their numeric id and password and receives
//! an opaque 128-character hex session token. The token is then presented to
//! verify the session or to close it.
//!
//! ## Layout
//!
//! - [`session`]: the authentication core. Password hashing (Argon2id), token
//!   generation, the `SessionStore` and `StudentDirectory` contracts and the
//!   `SessionService` that implements login, verify and logout.
//! - [`storage`]: PostgreSQL implementations of both contracts plus the schema
//!   bootstrap for `alumnos`, `profesores` and `sesiones`.
//! - [`api`]: the axum router, per-endpoint error mapping and the `OpenAPI`
//!   document.
//! - [`cli`]: argument parsing, telemetry and the actions run by the binary.
//!
//! ## Sessions
//!
//! Sessions never expire. Logout only flips the `active` flag, so a token that
//! was closed keeps failing verification instead of disappearing. `verify`
//! answers unknown and foreign sessions the same way, while `login` tells an
//! unknown student apart from a wrong password.

pub mod api;
pub mod cli;
pub mod session;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
