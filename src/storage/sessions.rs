//! `sesiones` table access.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::Instrument;
use uuid::Uuid;

use crate::session::{Session, SessionError, SessionStore};

#[derive(Clone, Debug)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn put(&self, session: &Session) -> Result<(), SessionError> {
        let query = r"
            INSERT INTO sesiones (id, fecha, alumno_id, active, session_string)
            VALUES ($1, $2, $3, $4, $5)
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(session.id)
            .bind(session.created_at)
            .bind(i64::from(session.owner_id))
            .bind(session.active)
            .bind(&session.token)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, SessionError> {
        // Served by sesiones_session_string_idx.
        let query = r"
            SELECT id, fecha, alumno_id, active, session_string
            FROM sesiones
            WHERE session_string = $1
            ORDER BY fecha DESC
            LIMIT 1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        row.map(|row| session_from_row(&row)).transpose()
    }

    async fn deactivate(&self, session_id: Uuid) -> Result<(), SessionError> {
        let query = "UPDATE sesiones SET active = FALSE WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(session_id)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        if result.rows_affected() == 0 {
            return Err(SessionError::NotFound);
        }

        Ok(())
    }
}

fn session_from_row(row: &PgRow) -> Result<Session, SessionError> {
    let owner_id: i64 = row.try_get("alumno_id")?;
    let owner_id = u32::try_from(owner_id)
        .map_err(|_| SessionError::Storage(format!("alumno_id out of range: {owner_id}")))?;

    Ok(Session {
        id: row.try_get("id")?,
        created_at: row.try_get("fecha")?,
        owner_id,
        active: row.try_get("active")?,
        token: row.try_get("session_string")?,
    })
}
