use axum::{extract::State, Extension, Json};
use serde::Serialize;

use nutriscan_core::badge_label;

use crate::middleware::{RequestId, SessionUser};

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProfileData {
    pub scan_count: i32,
    pub badges: Vec<BadgeItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct BadgeItem {
    pub id: i16,
    pub label: &'static str,
    pub unlocked: bool,
}

/// Scan count plus the full badge board. Users the flow has never persisted
/// see a zeroed profile.
pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<ProfileData>>, ApiError> {
    let row = nutriscan_db::get_profile(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let (scan_count, slots) = match row {
        Some(row) => (row.scan_count, row.badge_slots()),
        None => (0, [None; nutriscan_core::BADGE_SLOTS]),
    };

    let badges = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let id = i16::try_from(index).unwrap_or(i16::MAX);
            BadgeItem {
                id,
                label: badge_label(id),
                unlocked: slot.is_some(),
            }
        })
        .collect();

    Ok(Json(ApiResponse {
        data: ProfileData { scan_count, badges },
        meta: ResponseMeta::new(req_id.0),
    }))
}
