//! Session persistence contract and the in-process implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Session, SessionError};

/// Persistence for session records.
///
/// Implementations must look sessions up by exact token match through an index,
/// and must never flip `active` back to `true` on an existing record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session record.
    async fn put(&self, session: &Session) -> Result<(), SessionError>;

    /// Most recent session recorded under `token`, if any.
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, SessionError>;

    /// Mark the session `active = false`. Already inactive sessions stay inactive
    /// and the call succeeds; unknown ids are `SessionError::NotFound`.
    async fn deactivate(&self, session_id: Uuid) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
struct Tables {
    by_id: HashMap<Uuid, Session>,
    // token -> id of the most recently stored session with that token
    by_token: HashMap<String, Uuid>,
}

/// Session store kept in process memory, indexed by id and by token.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tables: RwLock<Tables>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, active or not.
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session: &Session) -> Result<(), SessionError> {
        let mut tables = self.tables.write().await;
        tables.by_token.insert(session.token.clone(), session.id);
        tables.by_id.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, SessionError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_token
            .get(token)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn deactivate(&self, session_id: Uuid) -> Result<(), SessionError> {
        let mut tables = self.tables.write().await;
        match tables.by_id.get_mut(&session_id) {
            Some(session) => {
                session.active = false;
                Ok(())
            }
            None => Err(SessionError::NotFound),
        }
    }
}
