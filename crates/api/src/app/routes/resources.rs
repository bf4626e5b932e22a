use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use mes_core::ResourceId;
use mes_material_flow_resources::{CorrectionOutcome, CorrectionProposal};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_resource).get(list_resources))
        .route("/:id", get(get_resource))
        .route("/:id/corrections", post(correct_resource).get(list_corrections))
}

pub async fn register_resource(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterResourceRequest>,
) -> axum::response::Response {
    match services.register_resource(body) {
        Ok(resource) => (StatusCode::CREATED, Json(resource)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// All resources in number order.
pub async fn list_resources(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.resources())
}

pub async fn get_resource(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ResourceId = match errors::parse_id(&id, "resource") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.resource(&id) {
        Some(resource) => (StatusCode::OK, Json(resource)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "resource not found"),
    }
}

pub async fn correct_resource(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CorrectResourceRequest>,
) -> axum::response::Response {
    let id: ResourceId = match errors::parse_id(&id, "resource") {
        Ok(v) => v,
        Err(res) => return res,
    };

    let proposal = CorrectionProposal::new(body.quantity, body.storage_location, body.price);
    match services.correct_resource(&id, proposal) {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// 201 only when the correction record was stored; a correction that was
/// applied but not recorded answers 200 with `recorded: false`.
fn outcome_response(outcome: CorrectionOutcome) -> axum::response::Response {
    match outcome {
        CorrectionOutcome::Applied {
            correction,
            recorded,
        } => {
            let status = if recorded {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(serde_json::json!({
                    "corrected": true,
                    "recorded": recorded,
                    "correction": correction,
                })),
            )
                .into_response()
        }
        CorrectionOutcome::Unchanged => (
            StatusCode::OK,
            Json(serde_json::json!({ "corrected": false })),
        )
            .into_response(),
        CorrectionOutcome::Rejected(rejected) => errors::validation_errors_to_response(rejected),
    }
}

pub async fn list_corrections(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ResourceId = match errors::parse_id(&id, "resource") {
        Ok(v) => v,
        Err(res) => return res,
    };

    if services.resource(&id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "resource not found");
    }
    (StatusCode::OK, Json(services.corrections_for(&id))).into_response()
}
