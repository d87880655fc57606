//! Database operations for `weekly_challenges` and `weekly_challenges_users`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use nutriscan_core::{ChallengeDefinition, ChallengeProgress};

use crate::DbError;

/// A row from the `weekly_challenges` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChallengeRow {
    pub id: i16,
    pub name: String,
    pub criteria: String,
    pub value: String,
}

impl From<ChallengeRow> for ChallengeDefinition {
    fn from(row: ChallengeRow) -> Self {
        Self {
            // Ids outside 0–4 cannot occur under the schema CHECK; map them
            // to an out-of-range slot the reconciler ignores rather than
            // panicking on a hand-edited row.
            id: u8::try_from(row.id).unwrap_or(u8::MAX),
            name: row.name,
            criteria: row.criteria,
            value: row.value,
        }
    }
}

/// A row from the `weekly_challenges_users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChallengeProgressRow {
    pub user_id: Uuid,
    pub challenge1: i32,
    pub challenge2: i32,
    pub challenge3: i32,
    pub challenge4: i32,
    pub challenge5: i32,
    pub completed: i32,
    pub updated_at: DateTime<Utc>,
}

impl ChallengeProgressRow {
    /// The row's counters as the in-memory reconciliation state.
    #[must_use]
    pub fn progress(&self) -> ChallengeProgress {
        ChallengeProgress {
            counts: [
                self.challenge1,
                self.challenge2,
                self.challenge3,
                self.challenge4,
                self.challenge5,
            ],
            completed: self.completed,
        }
    }
}

/// Loads the active challenge definitions, ordered by slot id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_challenge_definitions(pool: &PgPool) -> Result<Vec<ChallengeDefinition>, DbError> {
    let rows = sqlx::query_as::<_, ChallengeRow>(
        "SELECT id, name, criteria, value FROM weekly_challenges ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Fetches the user's challenge counters, zero-creating the row the first
/// time the user is observed.
///
/// The no-op `DO UPDATE` on conflict makes the statement return the existing
/// row in the same round-trip as the insert attempt.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn get_or_create_challenge_progress(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<ChallengeProgressRow, DbError> {
    let row = sqlx::query_as::<_, ChallengeProgressRow>(
        "INSERT INTO weekly_challenges_users (user_id) VALUES ($1) \
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
         RETURNING user_id, challenge1, challenge2, challenge3, challenge4, challenge5, \
                   completed, updated_at",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Fetches the user's challenge counters without creating a row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_challenge_progress(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ChallengeProgressRow>, DbError> {
    let row = sqlx::query_as::<_, ChallengeProgressRow>(
        "SELECT user_id, challenge1, challenge2, challenge3, challenge4, challenge5, \
                completed, updated_at \
         FROM weekly_challenges_users \
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upserts the five slot counters and the aggregate in one statement,
/// last-writer-wins keyed on `user_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_challenge_progress(
    pool: &PgPool,
    user_id: Uuid,
    progress: &ChallengeProgress,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO weekly_challenges_users \
             (user_id, challenge1, challenge2, challenge3, challenge4, challenge5, completed) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (user_id) DO UPDATE SET \
             challenge1 = EXCLUDED.challenge1, \
             challenge2 = EXCLUDED.challenge2, \
             challenge3 = EXCLUDED.challenge3, \
             challenge4 = EXCLUDED.challenge4, \
             challenge5 = EXCLUDED.challenge5, \
             completed  = EXCLUDED.completed, \
             updated_at = NOW()",
    )
    .bind(user_id)
    .bind(progress.counts[0])
    .bind(progress.counts[1])
    .bind(progress.counts[2])
    .bind(progress.counts[3])
    .bind(progress.counts[4])
    .bind(progress.completed)
    .execute(pool)
    .await?;
    Ok(())
}
