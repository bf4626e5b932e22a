use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mes_core::{DomainError, ValidationErrors};

use crate::app::services::ServiceError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::UnknownProduct(id) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "unknown_product",
            format!("product {id} does not exist"),
        ),
        ServiceError::ResourceNotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("resource {id} not found"),
        ),
        ServiceError::Invalid(errors) => validation_errors_to_response(errors),
    }
}

/// 422 with the field-keyed errors reported by the entity store.
pub fn validation_errors_to_response(errors: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": errors.to_string(),
            "errors": errors,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path identifier or answer 400 `invalid_id`.
pub fn parse_id<T>(raw: &str, what: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr,
{
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("invalid {what} id")))
}
