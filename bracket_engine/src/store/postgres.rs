//! PostgreSQL bracket store.

use super::{BracketStore, StoreError, StoreResult};
use crate::{
    bracket::{Bracket, Roster},
    tournament::models::{BracketDocument, TournamentId, TournamentStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, types::Json};
use std::sync::Arc;

/// Schema for the `brackets` table
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS brackets (
    tournament_id TEXT PRIMARY KEY,
    participants JSONB NOT NULL,
    bracket JSONB NOT NULL,
    status TEXT NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Bracket store keeping one JSONB document per tournament
#[derive(Clone)]
pub struct PgBracketStore {
    pool: Arc<PgPool>,
}

impl PgBracketStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create the `brackets` table if it does not exist
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[async_trait]
impl BracketStore for PgBracketStore {
    async fn load(&self, tournament_id: &str) -> StoreResult<Option<BracketDocument>> {
        let row = sqlx::query(
            "SELECT tournament_id, participants, bracket, status, updated_at
             FROM brackets WHERE tournament_id = $1",
        )
        .bind(tournament_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status: String = row.try_get("status")?;
        let status = status
            .parse::<TournamentStatus>()
            .map_err(|reason| StoreError::Corrupt {
                tournament_id: tournament_id.to_string(),
                reason,
            })?;

        let Json(roster): Json<Roster> = row.try_get("participants")?;
        let Json(bracket): Json<Bracket> = row.try_get("bracket")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

        Ok(Some(BracketDocument {
            tournament_id: row.try_get("tournament_id")?,
            roster,
            bracket,
            status,
            updated_at,
        }))
    }

    async fn save(&self, document: &BracketDocument) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO brackets (tournament_id, participants, bracket, status, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tournament_id) DO UPDATE
            SET participants = EXCLUDED.participants,
                bracket = EXCLUDED.bracket,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&document.tournament_id)
        .bind(Json(&document.roster))
        .bind(Json(&document.bracket))
        .bind(document.status.as_str())
        .bind(document.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, tournament_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM brackets WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_ids(&self) -> StoreResult<Vec<TournamentId>> {
        let rows = sqlx::query("SELECT tournament_id FROM brackets ORDER BY tournament_id ASC")
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.iter()
            .map(|r| r.try_get("tournament_id").map_err(StoreError::from))
            .collect()
    }
}
