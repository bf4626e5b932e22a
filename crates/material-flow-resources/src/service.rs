//! Resource correction: audit a change of quantity, price or storage location
//! and reconcile aggregate stock.

use rust_decimal::Decimal;
use thiserror::Error;

use mes_core::{ResourceCorrectionId, ResourceId, StorageLocationId, ValidationErrors};

use crate::constants::MODEL_RESOURCE_CORRECTION;
use crate::correction::{ChangeSet, CorrectionProposal, ResourceCorrection};
use crate::repository::{NumberGenerator, ResourceCorrectionRepository, ResourceRepository};
use crate::resource::Resource;
use crate::stock::ResourceStockService;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    /// The resource to correct is not persisted (caller error).
    #[error("resource {0} not found")]
    ResourceNotFound(ResourceId),
}

/// Result of a correction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionOutcome {
    /// Nothing differed from the persisted resource; nothing was written.
    Unchanged,
    /// The store rejected the corrected resource; no correction was recorded.
    ///
    /// The caller's resource object still carries the attempted mutation.
    Rejected(ValidationErrors),
    /// The resource was saved and stock adjusted.
    ///
    /// `recorded` is false when the correction store rejected the audit
    /// record; the resource and stock changes stand regardless.
    Applied {
        correction: ResourceCorrection,
        recorded: bool,
    },
}

impl CorrectionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CorrectionOutcome::Applied { .. })
    }
}

/// Creates correction records for resources and keeps aggregate stock in step.
///
/// Collaborators are injected; there is no version check between the re-fetch
/// and the save, so concurrent corrections of one resource race (last write wins).
#[derive(Debug)]
pub struct ResourceCorrectionService<R, C, N, S> {
    resources: R,
    corrections: C,
    numbers: N,
    stock: S,
}

impl<R, C, N, S> ResourceCorrectionService<R, C, N, S>
where
    R: ResourceRepository,
    C: ResourceCorrectionRepository,
    N: NumberGenerator,
    S: ResourceStockService,
{
    pub fn new(resources: R, corrections: C, numbers: N, stock: S) -> Self {
        Self {
            resources,
            corrections,
            numbers,
            stock,
        }
    }

    /// Correct `resource` to the given values.
    ///
    /// Returns `Ok(true)` when the resource was corrected and `Ok(false)` when
    /// nothing changed or the store rejected the corrected resource.
    pub fn create_correction_for_resource(
        &self,
        resource: &mut Resource,
        new_quantity: Decimal,
        new_storage_location: Option<StorageLocationId>,
        new_price: Option<Decimal>,
    ) -> Result<bool, CorrectionError> {
        let proposal = CorrectionProposal::new(new_quantity, new_storage_location, new_price);
        Ok(self.correct(resource, proposal)?.is_applied())
    }

    /// Correct `resource` to the values in `proposal`, reporting what happened.
    pub fn correct(
        &self,
        resource: &mut Resource,
        proposal: CorrectionProposal,
    ) -> Result<CorrectionOutcome, CorrectionError> {
        let resource_id = resource.id_typed();

        // Decide against the persisted state, not the caller's copy.
        let old = self
            .resources
            .find(&resource_id)
            .ok_or(CorrectionError::ResourceNotFound(resource_id))?;

        let changes = ChangeSet::detect(&old, &proposal);
        if !changes.is_material() {
            tracing::debug!(resource_id = %resource_id, "resource unchanged; no correction needed");
            return Ok(CorrectionOutcome::Unchanged);
        }

        let number = self.numbers.generate_number(MODEL_RESOURCE_CORRECTION);
        let correction = ResourceCorrection::record(ResourceCorrectionId::new(), number, &old, &proposal);

        resource.apply_corrected_quantity(proposal.new_quantity);
        if let Err(errors) = self.resources.save(resource.clone()) {
            tracing::warn!(
                resource_id = %resource_id,
                errors = %errors,
                "corrected resource rejected; correction discarded"
            );
            return Ok(CorrectionOutcome::Rejected(errors));
        }

        let recorded = match self.corrections.save(correction.clone()) {
            Ok(_) => true,
            Err(errors) => {
                tracing::error!(
                    resource_id = %resource_id,
                    correction_number = correction.number(),
                    errors = %errors,
                    "failed to store resource correction"
                );
                false
            }
        };

        let difference = correction.difference();
        if difference > Decimal::ZERO {
            self.stock
                .add_resource_stock(old.product(), old.location(), difference);
        } else {
            // Also reached with a zero difference (price/location-only change).
            self.stock
                .remove_resource_stock(old.product(), old.location(), difference.abs());
        }

        tracing::info!(
            resource_id = %resource_id,
            correction_number = correction.number(),
            old_quantity = %old.quantity(),
            new_quantity = %proposal.new_quantity,
            quantity_changed = changes.quantity_changed,
            price_changed = changes.price_changed,
            storage_location_changed = changes.storage_location_changed,
            recorded,
            "resource corrected"
        );

        Ok(CorrectionOutcome::Applied {
            correction,
            recorded,
        })
    }
}
