//! Persisted field names.
//!
//! Records serialize with these keys and validation errors are reported
//! against them.

pub struct ResourceFields;

impl ResourceFields {
    pub const NUMBER: &'static str = "number";
    pub const PRODUCT: &'static str = "product";
    pub const LOCATION: &'static str = "location";
    pub const STORAGE_LOCATION: &'static str = "storageLocation";
    pub const BATCH: &'static str = "batch";
    pub const QUANTITY: &'static str = "quantity";
    pub const PRICE: &'static str = "price";
    pub const RESERVED_QUANTITY: &'static str = "reservedQuantity";
    pub const AVAILABLE_QUANTITY: &'static str = "availableQuantity";
    pub const CONVERSION: &'static str = "conversion";
    pub const QUANTITY_IN_ADDITIONAL_UNIT: &'static str = "quantityInAdditionalUnit";
    pub const TIME: &'static str = "time";
    pub const IS_CORRECTED: &'static str = "isCorrected";
}

pub struct ResourceCorrectionFields;

impl ResourceCorrectionFields {
    pub const NUMBER: &'static str = "number";
    pub const RESOURCE: &'static str = "resource";
    pub const PRODUCT: &'static str = "product";
    pub const LOCATION: &'static str = "location";
    pub const BATCH: &'static str = "batch";
    pub const OLD_QUANTITY: &'static str = "oldQuantity";
    pub const NEW_QUANTITY: &'static str = "newQuantity";
    pub const OLD_PRICE: &'static str = "oldPrice";
    pub const NEW_PRICE: &'static str = "newPrice";
    pub const OLD_STORAGE_LOCATION: &'static str = "oldStorageLocation";
    pub const NEW_STORAGE_LOCATION: &'static str = "newStorageLocation";
    pub const TIME: &'static str = "time";
}
