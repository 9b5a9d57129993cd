//! Login, verify and logout orchestration.
//!
//! Flow Overview:
//! 1) `login` checks the student's password and stores a new active session.
//! 2) `verify` is a read-only check that a token is active and owned by the student.
//! 3) `logout` deactivates the session found for a token, by its internal id.
//!
//! A session moves `active -> inactive` exactly once and never back. Students
//! may hold any number of active sessions at the same time.

use std::{
    future::Future,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tracing::{debug, info, instrument, warn};

use super::{
    Session, SessionError, SessionStore, StudentDirectory, StudentId,
    password::verify_password_blocking,
    token::{generate_session_token, is_blank},
};

const DEFAULT_STORE_TIMEOUT_SECONDS: u64 = 5;

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    store_timeout: Duration,
}

impl SessionConfig {
    /// Default config: 5s deadline on every directory/store call.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECONDS),
        }
    }

    #[must_use]
    pub fn with_store_timeout_seconds(mut self, seconds: u64) -> Self {
        self.store_timeout = Duration::from_secs(seconds);
        self
    }

    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    students: Arc<dyn StudentDirectory>,
    config: SessionConfig,
}

impl SessionService {
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        students: Arc<dyn StudentDirectory>,
        config: SessionConfig,
    ) -> Self {
        Self {
            sessions,
            students,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Authenticate a student and open a new session.
    ///
    /// # Errors
    /// `NotFound` for an unknown student, `Unauthorized` for a wrong password,
    /// `Storage`/`Hashing`/`Entropy` for internal failures.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        student_id: StudentId,
        password: &str,
    ) -> Result<Session, SessionError> {
        let Some(student) = self
            .bounded("directory.get_by_id", self.students.get_by_id(student_id))
            .await?
        else {
            debug!("student not found");
            return Err(SessionError::NotFound);
        };

        if !verify_password_blocking(student.password_hash, password.to_string()).await? {
            warn!("password mismatch");
            return Err(SessionError::Unauthorized);
        }

        let token = generate_session_token()?;
        let session = Session::new(student_id, token, now_unix_seconds());

        self.bounded("sessions.put", self.sessions.put(&session))
            .await?;

        info!(session_id = %session.id, "session opened");

        Ok(session)
    }

    /// Check that `token` names an active session owned by `student_id`.
    ///
    /// Unknown, foreign and inactive sessions are all `Unauthorized` so callers
    /// cannot tell them apart.
    ///
    /// # Errors
    /// `InvalidInput` for a blank token, `Unauthorized` as above, `Storage` for
    /// backend failures.
    #[instrument(skip(self, token))]
    pub async fn verify(&self, student_id: StudentId, token: &str) -> Result<(), SessionError> {
        if is_blank(token) {
            return Err(SessionError::InvalidInput("sessionString is required"));
        }

        let Some(session) = self
            .bounded("sessions.find_by_token", self.sessions.find_by_token(token))
            .await?
        else {
            debug!("no session for token");
            return Err(SessionError::Unauthorized);
        };

        if !session.is_owned_by(student_id) {
            warn!(session_id = %session.id, "session owned by another student");
            return Err(SessionError::Unauthorized);
        }

        if !session.active {
            debug!(session_id = %session.id, "session inactive");
            return Err(SessionError::Unauthorized);
        }

        Ok(())
    }

    /// Close the session named by `token`.
    ///
    /// Closing an already closed session succeeds.
    ///
    /// # Errors
    /// `InvalidInput` for a blank token, `NotFound` when no session has this
    /// token, `Unauthorized` when it belongs to another student, `Storage` for
    /// backend failures.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, student_id: StudentId, token: &str) -> Result<(), SessionError> {
        if is_blank(token) {
            return Err(SessionError::InvalidInput("sessionString is required"));
        }

        let Some(session) = self
            .bounded("sessions.find_by_token", self.sessions.find_by_token(token))
            .await?
        else {
            debug!("no session for token");
            return Err(SessionError::NotFound);
        };

        if !session.is_owned_by(student_id) {
            warn!(session_id = %session.id, "refusing to close another student's session");
            return Err(SessionError::Unauthorized);
        }

        self.bounded("sessions.deactivate", self.sessions.deactivate(session.id))
            .await?;

        info!(session_id = %session.id, "session closed");

        Ok(())
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, "store call exceeded deadline");
                Err(SessionError::Storage(format!("{operation} timed out")))
            }
        }
    }
}

fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::{
        MemorySessionStore, MemoryStudentDirectory, StudentCredential, password::hash_password,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Store that counts calls and can be told to hang.
    #[derive(Default)]
    struct CountingStore {
        inner: MemorySessionStore,
        calls: AtomicUsize,
        hang: bool,
    }

    #[async_trait]
    impl SessionStore for CountingStore {
        async fn put(&self, session: &Session) -> Result<(), SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang {
                std::future::pending::<()>().await;
            }
            self.inner.put(session).await
        }

        async fn find_by_token(&self, token: &str) -> Result<Option<Session>, SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang {
                std::future::pending::<()>().await;
            }
            self.inner.find_by_token(token).await
        }

        async fn deactivate(&self, session_id: Uuid) -> Result<(), SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.deactivate(session_id).await
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl StudentDirectory for FailingDirectory {
        async fn get_by_id(
            &self,
            _id: StudentId,
        ) -> Result<Option<StudentCredential>, SessionError> {
            Err(SessionError::Storage("connection refused".to_string()))
        }
    }

    async fn directory_with(id: StudentId, password: &str) -> Arc<MemoryStudentDirectory> {
        let directory = Arc::new(MemoryStudentDirectory::new());
        directory.insert(id, hash_password(password).unwrap()).await;
        directory
    }

    #[test]
    fn config_defaults_and_overrides() {
        assert_eq!(SessionConfig::new().store_timeout(), Duration::from_secs(5));
        assert_eq!(
            SessionConfig::new()
                .with_store_timeout_seconds(2)
                .store_timeout(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_unix_seconds() > 1_577_836_800);
    }

    #[tokio::test]
    async fn blank_tokens_never_reach_the_store() {
        let store = Arc::new(CountingStore::default());
        let service = SessionService::new(
            store.clone(),
            directory_with(7, "secret123").await,
            SessionConfig::new(),
        );

        for token in ["", " ", "\t\n"] {
            assert!(matches!(
                service.verify(7, token).await,
                Err(SessionError::InvalidInput(_))
            ));
            assert!(matches!(
                service.logout(7, token).await,
                Err(SessionError::InvalidInput(_))
            ));
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn directory_failure_propagates_as_storage() {
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(FailingDirectory),
            SessionConfig::new(),
        );
        let result = service.login(7, "secret123").await;
        assert!(matches!(result, Err(SessionError::Storage(_))));
    }

    #[tokio::test]
    async fn hung_store_hits_the_deadline() {
        let store = Arc::new(CountingStore {
            hang: true,
            ..CountingStore::default()
        });
        let service = SessionService::new(
            store,
            directory_with(7, "secret123").await,
            SessionConfig::new().with_store_timeout(Duration::from_millis(50)),
        );

        let login = service.login(7, "secret123").await;
        assert!(matches!(login, Err(SessionError::Storage(_))));

        let verify = service.verify(7, &"a".repeat(128)).await;
        assert!(matches!(verify, Err(SessionError::Storage(_))));
    }

    #[tokio::test]
    async fn logout_does_not_touch_foreign_session() {
        let store = Arc::new(MemorySessionStore::new());
        let service = SessionService::new(
            store.clone(),
            directory_with(7, "secret123").await,
            SessionConfig::new(),
        );
        let session = service.login(7, "secret123").await.unwrap();

        let result = service.logout(8, &session.token).await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));

        let stored = store.find_by_token(&session.token).await.unwrap().unwrap();
        assert!(stored.active);
        assert!(service.verify(7, &session.token).await.is_ok());
    }

    #[tokio::test]
    async fn login_with_corrupt_stored_hash_is_unauthorized() {
        let directory = Arc::new(MemoryStudentDirectory::new());
        directory.insert(7, "plaintext-by-mistake".to_string()).await;
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            directory,
            SessionConfig::new(),
        );
        let result = service.login(7, "plaintext-by-mistake").await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn login_leaves_the_runtime_free_while_hashing() {
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            directory_with(7, "secret123").await,
            SessionConfig::new(),
        );

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = tokio::spawn({
            let ticks = ticks.clone();
            async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                }
            }
        });

        let session = service.login(7, "secret123").await.unwrap();
        // Read before any further await: only ticks made during login count.
        let during_login = ticks.load(Ordering::SeqCst);
        ticker.abort();

        assert!(session.active);
        assert!(during_login > 0);
    }
}
