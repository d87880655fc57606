use axum::{extract::State, Extension, Json};

use nutriscan_core::Preferences;

use crate::middleware::{RequestId, SessionUser};

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// The caller's preference configuration; an empty one when never saved.
pub(super) async fn get_preferences(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<Preferences>>, ApiError> {
    let preferences = nutriscan_db::get_preferences(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .unwrap_or_default();

    Ok(Json(ApiResponse {
        data: preferences,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Replace the caller's preference configuration wholesale.
pub(super) async fn put_preferences(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    SessionUser(user_id): SessionUser,
    Json(preferences): Json<Preferences>,
) -> Result<Json<ApiResponse<Preferences>>, ApiError> {
    nutriscan_db::upsert_preferences(&state.pool, user_id, &preferences)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: preferences,
        meta: ResponseMeta::new(req_id.0),
    }))
}
