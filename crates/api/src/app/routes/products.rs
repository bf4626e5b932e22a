use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use mes_basic::Page;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_product))
        .route("/lookup", get(lookup_view))
        .route("/records", get(records))
        .route("/config", get(config))
}

pub async fn register_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterProductRequest>,
) -> axum::response::Response {
    match services.register_product(body) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// View a picker opens for products.
pub async fn lookup_view(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.product_lookup().lookup_view())
}

/// Product summaries sorted by `sidx`/`sord`.
pub async fn records(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::RecordsQuery>,
) -> axum::response::Response {
    let page = match (query.page, query.rows) {
        (page, Some(rows)) => match Page::new(page.unwrap_or(1), rows) {
            Ok(p) => Some(p),
            Err(e) => return errors::domain_error_to_response(e),
        },
        (Some(_), None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "page requires rows",
            );
        }
        (None, None) => None,
    };

    let lookup = services.product_lookup();
    match lookup.records(query.sidx.as_deref(), query.sord.as_deref(), page) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Grid column configuration.
pub async fn config(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.product_lookup().config())
}
