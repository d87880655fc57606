use axum::{
    extract::{Path, State},
    Extension, Json,
};

use nutriscan_core::ProductFacts;
use nutriscan_openfood::OpenFoodError;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Product facts without the gamification flow, for plain browsing.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(barcode): Path<String>,
) -> Result<Json<ApiResponse<ProductFacts>>, ApiError> {
    match state.openfood.get_product(barcode.trim()).await {
        Ok(facts) => Ok(Json(ApiResponse {
            data: facts,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(OpenFoodError::NotFound { .. }) => Err(ApiError::new(
            req_id.0,
            "not_found",
            "no product for that barcode",
        )),
        Err(e) => {
            tracing::warn!(error = %e, "product lookup failed");
            Err(ApiError::new(
                req_id.0,
                "upstream_unavailable",
                "product lookup failed",
            ))
        }
    }
}
