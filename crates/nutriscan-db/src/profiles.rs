//! Database operations for `profiles`: scan counts and badge slots.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use nutriscan_core::{BadgeSlots, BADGE_SLOTS};

use crate::DbError;

/// A row from the `profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub scan_count: i32,
    pub badges: Vec<Option<i16>>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// The badge array as the fixed-size slot layout.
    ///
    /// Rows written before the slot count grew are padded with locked slots;
    /// anything beyond the fixed count is dropped.
    #[must_use]
    pub fn badge_slots(&self) -> BadgeSlots {
        let mut slots: BadgeSlots = [None; BADGE_SLOTS];
        for (slot, value) in slots.iter_mut().zip(&self.badges) {
            *slot = *value;
        }
        slots
    }
}

/// Fetches the user's profile, zero-creating the row the first time the user
/// is observed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn get_or_create_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileRow, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "INSERT INTO profiles (user_id) VALUES ($1) \
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
         RETURNING user_id, scan_count, badges, updated_at",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Fetches the user's profile without creating a row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT user_id, scan_count, badges, updated_at FROM profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upserts the scan count and badge array in one statement, last-writer-wins
/// keyed on `user_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    scan_count: i32,
    badges: &BadgeSlots,
) -> Result<(), DbError> {
    let badges: Vec<Option<i16>> = badges.to_vec();
    sqlx::query(
        "INSERT INTO profiles (user_id, scan_count, badges) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (user_id) DO UPDATE SET \
             scan_count = EXCLUDED.scan_count, \
             badges     = EXCLUDED.badges, \
             updated_at = NOW()",
    )
    .bind(user_id)
    .bind(scan_count)
    .bind(badges)
    .execute(pool)
    .await?;
    Ok(())
}
