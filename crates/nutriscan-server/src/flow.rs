//! One scan event, end to end.
//!
//! The pure reconciliation rules live in `nutriscan-core`; this module
//! executes them against the remote collaborators in order: product lookup,
//! challenge counters, badge engine, AI assessment.
//!
//! Failure policy: a failed lookup or a failed read of the challenge row
//! aborts the flow with no state mutation. A failed write is logged and the
//! flow carries on with its in-memory result. A failed profile read skips
//! only the badge step. Assessment failures never touch the counters.

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use nutriscan_core::{
    badge_label, evaluate_badges, reconcile_scan, unlock_badge, Notification, NotificationKind,
    NutrientThresholdEvaluator, ProductFacts,
};

use crate::api::AppState;

/// Errors that abort the scan flow outright.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Lookup(#[from] nutriscan_openfood::OpenFoodError),
    #[error(transparent)]
    Store(#[from] nutriscan_db::DbError),
}

/// Everything one scan produced for the client.
#[derive(Debug)]
pub struct ScanResult {
    pub product: ProductFacts,
    pub assessment: Option<String>,
    pub notifications: Vec<Notification>,
}

/// Run the full reconciliation flow for one decoded barcode.
///
/// Without a session, the flow stops after the lookup: product facts come
/// back, nothing is persisted, no notification fires.
///
/// # Errors
///
/// Returns [`ScanError::Lookup`] when the product lookup fails and
/// [`ScanError::Store`] when the challenge row cannot be read.
pub async fn run_scan(
    state: &AppState,
    user: Option<Uuid>,
    barcode: &str,
) -> Result<ScanResult, ScanError> {
    let product = state.openfood.get_product(barcode).await.inspect_err(|e| {
        warn!(barcode, error = %e, "product lookup failed; scan aborted");
    })?;

    let Some(user_id) = user else {
        debug!(barcode, "no session; returning product facts only");
        return Ok(ScanResult {
            product,
            assessment: None,
            notifications: Vec::new(),
        });
    };

    let _guard = state.scan_gate.acquire(user_id).await;

    let mut notifications = Vec::new();

    // Challenge reconciliation. The read must succeed before anything is
    // written; the write is last-writer-wins and fire-and-forget.
    let prior = nutriscan_db::get_or_create_challenge_progress(&state.pool, user_id).await?;
    let outcome = reconcile_scan(
        &prior.progress(),
        &state.challenges,
        &NutrientThresholdEvaluator,
        &product,
        &state.notifications,
    );
    if let Err(e) =
        nutriscan_db::upsert_challenge_progress(&state.pool, user_id, &outcome.progress).await
    {
        tracing::error!(%user_id, error = %e, "challenge progress upsert failed");
    }
    notifications.extend(outcome.notification);

    // Badge engine. The scan count advances on every scan and is persisted
    // whether or not a badge unlocked.
    match nutriscan_db::get_or_create_profile(&state.pool, user_id).await {
        Ok(profile) => {
            let scan_count = profile.scan_count + 1;
            let mut slots = profile.badge_slots();
            if let Some(badge_id) =
                evaluate_badges(scan_count, outcome.progress.completed, &slots)
            {
                unlock_badge(&mut slots, badge_id);
                debug!(%user_id, badge_id, "badge unlocked");
                notifications.push(Notification::new(
                    &state.notifications,
                    NotificationKind::BadgeUnlocked {
                        badge_id,
                        label: badge_label(badge_id).to_string(),
                    },
                ));
            }
            if let Err(e) =
                nutriscan_db::upsert_profile(&state.pool, user_id, scan_count, &slots).await
            {
                tracing::error!(%user_id, error = %e, "profile upsert failed");
            }
        }
        Err(e) => {
            tracing::error!(%user_id, error = %e, "profile read failed; badge evaluation skipped");
        }
    }

    let assessment = assess(state, user_id, &product).await;

    Ok(ScanResult {
        product,
        assessment,
        notifications,
    })
}

/// Request the AI assessment. Absent or empty preferences skip the call
/// entirely; any failure resolves to `None` without surfacing.
async fn assess(state: &AppState, user_id: Uuid, product: &ProductFacts) -> Option<String> {
    let advisor = state.advisor.as_ref()?;

    let preferences = match nutriscan_db::get_preferences(&state.pool, user_id).await {
        Ok(preferences) => preferences,
        Err(e) => {
            warn!(%user_id, error = %e, "preference read failed; assessment skipped");
            return None;
        }
    }?;
    if preferences.is_empty() {
        return None;
    }

    match advisor.assess_product(product, &preferences).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(%user_id, error = %e, "assessment request failed");
            None
        }
    }
}
