use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Student identifier as it appears in `/alumnos/{id}`.
pub type StudentId = u32;

/// A login session.
///
/// Field names on the wire follow the persisted record layout
/// (`fecha`, `alumnoId`, `sessionString`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// Unix seconds at creation.
    #[serde(rename = "fecha")]
    pub created_at: i64,
    #[serde(rename = "alumnoId")]
    pub owner_id: StudentId,
    pub active: bool,
    #[serde(rename = "sessionString")]
    pub token: String,
}

impl Session {
    /// A fresh, active session for `owner_id`.
    #[must_use]
    pub fn new(owner_id: StudentId, token: String, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            owner_id,
            active: true,
            token,
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, student_id: StudentId) -> bool {
        self.owner_id == student_id
    }
}

/// The read-only credential view of a student record.
#[derive(Clone, PartialEq, Eq)]
pub struct StudentCredential {
    pub id: StudentId,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for StudentCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentCredential")
            .field("id", &self.id)
            .field("password_hash", &"***")
            .finish()
    }
}
