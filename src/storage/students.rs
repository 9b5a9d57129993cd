use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::Instrument;

use crate::session::{SessionError, StudentCredential, StudentDirectory, StudentId};

/// Student credentials read from the `alumnos` table.
#[derive(Clone, Debug)]
pub struct PgStudentDirectory {
    pool: PgPool,
}

impl PgStudentDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentDirectory for PgStudentDirectory {
    async fn get_by_id(&self, id: StudentId) -> Result<Option<StudentCredential>, SessionError> {
        let query = "SELECT password FROM alumnos WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        row.map(|row| -> Result<StudentCredential, SessionError> {
            Ok(StudentCredential {
                id,
                password_hash: row.try_get("password")?,
            })
        })
        .transpose()
    }
}
