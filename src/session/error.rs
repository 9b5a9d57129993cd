use thiserror::Error;

/// Every failure the session core can produce.
///
/// `NotFound`, `Unauthorized` and `InvalidInput` are domain outcomes and map to
/// 4xx responses. The rest are internal and must never leak detail to clients.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("resource not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("password hashing failure: {0}")]
    Hashing(String),
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

impl SessionError {
    /// True for failures produced on purpose by the service (safe to report to callers).
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Unauthorized | Self::InvalidInput(_)
        )
    }
}

impl From<sqlx::Error> for SessionError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
