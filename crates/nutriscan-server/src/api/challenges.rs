use axum::{extract::State, Extension, Json};
use serde::Serialize;

use nutriscan_core::CHALLENGE_SLOTS;

use crate::middleware::{RequestId, SessionUser};

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ChallengesData {
    pub challenges: Vec<ChallengeItem>,
    pub completed: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChallengeItem {
    pub id: u8,
    pub label: String,
    pub criteria: String,
    pub target_count: i32,
    pub progress: i32,
}

/// The active definitions joined with the caller's counters. Users without a
/// stored row see zeros; the row is only created by an authenticated scan.
pub(super) async fn list_challenges(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<ChallengesData>>, ApiError> {
    let progress = nutriscan_db::get_challenge_progress(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .map(|row| row.progress())
        .unwrap_or_default();

    let challenges = state
        .challenges
        .iter()
        .filter(|def| usize::from(def.id) < CHALLENGE_SLOTS)
        .map(|def| ChallengeItem {
            id: def.id,
            label: def.label().to_string(),
            criteria: def.criteria.clone(),
            target_count: def.target_count(),
            progress: progress.counts[usize::from(def.id)],
        })
        .collect();

    Ok(Json(ApiResponse {
        data: ChallengesData {
            challenges,
            completed: progress.completed,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
