use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mes_core::{
    Entity, LocationId, ModelIdentifier, ProductId, ResourceCorrectionId, ResourceId,
    StorageLocationId, Validate, ValidationErrors,
};

use crate::constants::MODEL_RESOURCE_CORRECTION;
use crate::fields::ResourceCorrectionFields;
use crate::resource::Resource;

/// Values a caller wants a resource to have after correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionProposal {
    pub new_quantity: Decimal,
    pub new_storage_location: Option<StorageLocationId>,
    pub new_price: Option<Decimal>,
}

impl CorrectionProposal {
    pub fn new(
        new_quantity: Decimal,
        new_storage_location: Option<StorageLocationId>,
        new_price: Option<Decimal>,
    ) -> Self {
        Self {
            new_quantity,
            new_storage_location,
            new_price,
        }
    }
}

/// Which correctable attributes differ between a stored resource and a proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub quantity_changed: bool,
    pub price_changed: bool,
    pub storage_location_changed: bool,
}

impl ChangeSet {
    /// Compare a proposal against the persisted state of a resource.
    ///
    /// Quantities and prices compare numerically (`5.0` equals `5.00`). A price
    /// or storage location that is present on one side only counts as a change.
    pub fn detect(old: &Resource, proposal: &CorrectionProposal) -> Self {
        Self {
            quantity_changed: proposal.new_quantity != old.quantity(),
            price_changed: price_changed(old.price(), proposal.new_price),
            storage_location_changed: old.storage_location() != proposal.new_storage_location,
        }
    }

    /// A correction is needed when any attribute changed.
    pub fn is_material(&self) -> bool {
        self.quantity_changed || self.price_changed || self.storage_location_changed
    }
}

fn price_changed(old: Option<Decimal>, new: Option<Decimal>) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(old), Some(new)) => old != new,
        _ => true,
    }
}

/// Immutable audit record of one resource correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCorrection {
    id: ResourceCorrectionId,
    number: String,
    resource: ResourceId,
    product: ProductId,
    location: LocationId,
    batch: Option<String>,
    old_quantity: Decimal,
    new_quantity: Decimal,
    old_price: Option<Decimal>,
    new_price: Option<Decimal>,
    old_storage_location: Option<StorageLocationId>,
    new_storage_location: Option<StorageLocationId>,
    time: DateTime<Utc>,
}

impl ResourceCorrection {
    /// Record a correction from the persisted (pre-correction) resource and the
    /// proposed values. Descriptive fields come from `old`.
    pub fn record(
        id: ResourceCorrectionId,
        number: impl Into<String>,
        old: &Resource,
        proposal: &CorrectionProposal,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            resource: old.id_typed(),
            product: old.product(),
            location: old.location(),
            batch: old.batch().map(str::to_string),
            old_quantity: old.quantity(),
            new_quantity: proposal.new_quantity,
            old_price: old.price(),
            new_price: proposal.new_price,
            old_storage_location: old.storage_location(),
            new_storage_location: proposal.new_storage_location,
            time: old.time(),
        }
    }

    pub fn id_typed(&self) -> ResourceCorrectionId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn product(&self) -> ProductId {
        self.product
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn batch(&self) -> Option<&str> {
        self.batch.as_deref()
    }

    pub fn old_quantity(&self) -> Decimal {
        self.old_quantity
    }

    pub fn new_quantity(&self) -> Decimal {
        self.new_quantity
    }

    pub fn old_price(&self) -> Option<Decimal> {
        self.old_price
    }

    pub fn new_price(&self) -> Option<Decimal> {
        self.new_price
    }

    pub fn old_storage_location(&self) -> Option<StorageLocationId> {
        self.old_storage_location
    }

    pub fn new_storage_location(&self) -> Option<StorageLocationId> {
        self.new_storage_location
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Signed quantity delta (`new - old`).
    pub fn difference(&self) -> Decimal {
        self.new_quantity - self.old_quantity
    }
}

impl Entity for ResourceCorrection {
    type Id = ResourceCorrectionId;

    const MODEL: ModelIdentifier = MODEL_RESOURCE_CORRECTION;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Validate for ResourceCorrection {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.number.trim().is_empty() {
            errors.add(ResourceCorrectionFields::NUMBER, "cannot be empty");
        }
        errors.into_result()
    }
}
