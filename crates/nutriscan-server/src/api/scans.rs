use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use nutriscan_core::{Notification, ProductFacts};
use nutriscan_openfood::OpenFoodError;

use crate::flow::{self, ScanError};
use crate::middleware::{MaybeSessionUser, RequestId};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ScanRequest {
    pub barcode: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ScanData {
    product: ProductFacts,
    assessment: Option<String>,
    notifications: Vec<Notification>,
}

/// One scan event: lookup, reconcile, persist, assess.
///
/// The session is optional on purpose — an anonymous scan still resolves the
/// product, it just skips every persistence step.
pub(super) async fn create_scan(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    MaybeSessionUser(user): MaybeSessionUser,
    Json(body): Json<ScanRequest>,
) -> Result<Json<ApiResponse<ScanData>>, ApiError> {
    let barcode = body.barcode.trim();
    if barcode.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "barcode must be non-empty",
        ));
    }

    match flow::run_scan(&state, user, barcode).await {
        Ok(result) => Ok(Json(ApiResponse {
            data: ScanData {
                product: result.product,
                assessment: result.assessment,
                notifications: result.notifications,
            },
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(e) => Err(map_scan_error(req_id.0, &e)),
    }
}

fn map_scan_error(request_id: String, error: &ScanError) -> ApiError {
    match error {
        ScanError::Lookup(OpenFoodError::NotFound { .. }) => {
            ApiError::new(request_id, "not_found", "no product for that barcode")
        }
        ScanError::Lookup(e) => {
            tracing::warn!(error = %e, "product lookup failed");
            ApiError::new(request_id, "upstream_unavailable", "product lookup failed")
        }
        ScanError::Store(e) => {
            tracing::error!(error = %e, "scan flow aborted on store read");
            ApiError::new(request_id, "internal_error", "scan could not be recorded")
        }
    }
}
