use rust_decimal::Decimal;
use serde::Deserialize;

use mes_core::{LocationId, ProductId, StorageLocationId};

// -------------------------
// Request DTOs (camelCase, like the response bodies)
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProductRequest {
    pub number: String,
    pub name: String,
    pub unit: String,
    pub additional_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResourceRequest {
    pub product: ProductId,
    pub location: LocationId,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub storage_location: Option<StorageLocationId>,
    pub batch: Option<String>,
    pub conversion: Option<Decimal>,
    pub reserved_quantity: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectResourceRequest {
    pub quantity: Decimal,
    pub storage_location: Option<StorageLocationId>,
    pub price: Option<Decimal>,
}

/// Grid listing parameters (`sidx`, `sord`, optional `rows` with an optional `page`).
#[derive(Debug, Default, Deserialize)]
pub struct RecordsQuery {
    pub sidx: Option<String>,
    pub sord: Option<String>,
    pub page: Option<usize>,
    pub rows: Option<usize>,
}
