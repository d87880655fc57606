//! Database operations for the `preferences` table.
//!
//! Limits and diets are stored as JSONB so the preference editor can evolve
//! its shape without schema churn; the typed form lives in `nutriscan-core`.

use sqlx::PgPool;
use uuid::Uuid;

use nutriscan_core::{DietOption, NutrientLimit, Preferences};

use crate::DbError;

/// Fetches the user's preference configuration, or `None` when the user has
/// never saved one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::Json`] if a
/// stored document no longer matches the typed shape.
pub async fn get_preferences(pool: &PgPool, user_id: Uuid) -> Result<Option<Preferences>, DbError> {
    let row: Option<(serde_json::Value, serde_json::Value)> =
        sqlx::query_as("SELECT limits, diets FROM preferences WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    let Some((limits, diets)) = row else {
        return Ok(None);
    };
    let limits: Vec<NutrientLimit> = serde_json::from_value(limits)?;
    let diets: Vec<DietOption> = serde_json::from_value(diets)?;
    Ok(Some(Preferences { limits, diets }))
}

/// Upserts the full preference configuration, last-writer-wins keyed on
/// `user_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_preferences(
    pool: &PgPool,
    user_id: Uuid,
    preferences: &Preferences,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO preferences (user_id, limits, diets) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (user_id) DO UPDATE SET \
             limits     = EXCLUDED.limits, \
             diets      = EXCLUDED.diets, \
             updated_at = NOW()",
    )
    .bind(user_id)
    .bind(serde_json::to_value(&preferences.limits)?)
    .bind(serde_json::to_value(&preferences.diets)?)
    .execute(pool)
    .await?;
    Ok(())
}
