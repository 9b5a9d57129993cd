//! Session authentication core.
//!
//! Students log in with their id and password and receive a 128-character hex
//! session token. The token is later presented to verify or close the session.
//!
//! The service only talks to two injected collaborators: a `StudentDirectory`
//! (read-only credentials) and a `SessionStore` (session records). Both are
//! trait objects injected at construction.

mod directory;
mod error;
mod model;
pub mod password;
mod service;
mod store;
pub mod token;

pub use directory::{MemoryStudentDirectory, StudentDirectory};
pub use error::SessionError;
pub use model::{Session, StudentCredential, StudentId};
pub use service::{SessionConfig, SessionService};
pub use store::{MemorySessionStore, SessionStore};
