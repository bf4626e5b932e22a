use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mes_core::{
    Entity, LocationId, ModelIdentifier, ProductId, ResourceId, StorageLocationId, Validate,
    ValidationErrors,
};

use crate::constants::MODEL_RESOURCE;
use crate::fields::ResourceFields;

/// A quantity of a product held at a warehouse location.
///
/// `available_quantity` and `quantity_in_additional_unit` are derived and are
/// recomputed whenever the quantity, reservation or conversion changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    id: ResourceId,
    number: String,
    product: ProductId,
    location: LocationId,
    storage_location: Option<StorageLocationId>,
    batch: Option<String>,
    quantity: Decimal,
    price: Option<Decimal>,
    reserved_quantity: Decimal,
    available_quantity: Decimal,
    conversion: Decimal,
    quantity_in_additional_unit: Decimal,
    time: DateTime<Utc>,
    is_corrected: bool,
}

impl Resource {
    /// New resource with no reservation and a 1:1 conversion.
    pub fn new(
        id: ResourceId,
        number: impl Into<String>,
        product: ProductId,
        location: LocationId,
        quantity: Decimal,
        time: DateTime<Utc>,
    ) -> Self {
        let mut resource = Self {
            id,
            number: number.into(),
            product,
            location,
            storage_location: None,
            batch: None,
            quantity,
            price: None,
            reserved_quantity: Decimal::ZERO,
            available_quantity: Decimal::ZERO,
            conversion: Decimal::ONE,
            quantity_in_additional_unit: Decimal::ZERO,
            time,
            is_corrected: false,
        };
        resource.recalculate();
        resource
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_storage_location(mut self, storage_location: StorageLocationId) -> Self {
        self.storage_location = Some(storage_location);
        self
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    pub fn with_conversion(mut self, conversion: Decimal) -> Self {
        self.conversion = conversion;
        self.recalculate();
        self
    }

    pub fn with_reserved_quantity(mut self, reserved: Decimal) -> Self {
        self.reserved_quantity = reserved;
        self.recalculate();
        self
    }

    pub fn id_typed(&self) -> ResourceId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn product(&self) -> ProductId {
        self.product
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn storage_location(&self) -> Option<StorageLocationId> {
        self.storage_location
    }

    pub fn batch(&self) -> Option<&str> {
        self.batch.as_deref()
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn reserved_quantity(&self) -> Decimal {
        self.reserved_quantity
    }

    pub fn available_quantity(&self) -> Decimal {
        self.available_quantity
    }

    pub fn conversion(&self) -> Decimal {
        self.conversion
    }

    pub fn quantity_in_additional_unit(&self) -> Decimal {
        self.quantity_in_additional_unit
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn is_corrected(&self) -> bool {
        self.is_corrected
    }

    /// Set a corrected quantity and flag the resource as corrected.
    ///
    /// Derived quantities are recomputed from this resource's own conversion
    /// and reservation. Price and storage location are left untouched.
    pub fn apply_corrected_quantity(&mut self, new_quantity: Decimal) {
        self.quantity = new_quantity;
        self.is_corrected = true;
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.quantity_in_additional_unit = self.quantity * self.conversion;
        self.available_quantity = self.quantity - self.reserved_quantity;
    }
}

impl Entity for Resource {
    type Id = ResourceId;

    const MODEL: ModelIdentifier = MODEL_RESOURCE;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Validate for Resource {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.number.trim().is_empty() {
            errors.add(ResourceFields::NUMBER, "cannot be empty");
        }
        if self.quantity < Decimal::ZERO {
            errors.add(ResourceFields::QUANTITY, "must not be negative");
        }
        if self.reserved_quantity < Decimal::ZERO {
            errors.add(ResourceFields::RESERVED_QUANTITY, "must not be negative");
        }
        if self.conversion <= Decimal::ZERO {
            errors.add(ResourceFields::CONVERSION, "must be positive");
        }
        if self.available_quantity < Decimal::ZERO {
            errors.add(
                ResourceFields::AVAILABLE_QUANTITY,
                "reserved quantity exceeds quantity",
            );
        }
        if self.price.is_some_and(|p| p < Decimal::ZERO) {
            errors.add(ResourceFields::PRICE, "must not be negative");
        }

        errors.into_result()
    }
}
