use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use mes_core::{LocationId, ProductId};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_stock))
        .route("/:product_id/:location_id", get(get_stock))
}

/// Every booked (product, location) stock level.
pub async fn list_stock(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.stock_levels())
}

/// Aggregate stock of a product at a location (zero when nothing was booked).
pub async fn get_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path((product_id, location_id)): Path<(String, String)>,
) -> axum::response::Response {
    let product: ProductId = match errors::parse_id(&product_id, "product") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let location: LocationId = match errors::parse_id(&location_id, "location") {
        Ok(v) => v,
        Err(res) => return res,
    };

    (StatusCode::OK, Json(services.stock(product, location))).into_response()
}
