//! Student lookup contract consumed by the session service.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{SessionError, StudentCredential, StudentId};

/// Read-only access to student credentials.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn get_by_id(&self, id: StudentId) -> Result<Option<StudentCredential>, SessionError>;
}

/// Student directory kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStudentDirectory {
    students: RwLock<HashMap<StudentId, StudentCredential>>,
}

impl MemoryStudentDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a student with an already hashed password.
    pub async fn insert(&self, id: StudentId, password_hash: String) {
        self.students
            .write()
            .await
            .insert(id, StudentCredential { id, password_hash });
    }
}

#[async_trait]
impl StudentDirectory for MemoryStudentDirectory {
    async fn get_by_id(&self, id: StudentId) -> Result<Option<StudentCredential>, SessionError> {
        Ok(self.students.read().await.get(&id).cloned())
    }
}
