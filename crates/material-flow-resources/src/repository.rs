//! Storage and numbering contracts the correction flow depends on.

use std::sync::Arc;

use mes_core::{ModelIdentifier, ResourceId, ValidationErrors};

use crate::correction::ResourceCorrection;
use crate::resource::Resource;

/// Entity store for resources.
///
/// `save` runs the resource validation rules and rejects invalid state with
/// field-keyed errors; nothing is written in that case.
pub trait ResourceRepository: Send + Sync {
    fn find(&self, id: &ResourceId) -> Option<Resource>;
    fn save(&self, resource: Resource) -> Result<Resource, ValidationErrors>;
    fn list(&self) -> Vec<Resource>;
}

/// Entity store for resource correction audit records.
pub trait ResourceCorrectionRepository: Send + Sync {
    fn save(&self, correction: ResourceCorrection) -> Result<ResourceCorrection, ValidationErrors>;
    fn list_for_resource(&self, resource: &ResourceId) -> Vec<ResourceCorrection>;
}

/// Issues numbers that are unique per model.
pub trait NumberGenerator: Send + Sync {
    fn generate_number(&self, model: ModelIdentifier) -> String;
}

impl<R> ResourceRepository for Arc<R>
where
    R: ResourceRepository + ?Sized,
{
    fn find(&self, id: &ResourceId) -> Option<Resource> {
        (**self).find(id)
    }

    fn save(&self, resource: Resource) -> Result<Resource, ValidationErrors> {
        (**self).save(resource)
    }

    fn list(&self) -> Vec<Resource> {
        (**self).list()
    }
}

impl<C> ResourceCorrectionRepository for Arc<C>
where
    C: ResourceCorrectionRepository + ?Sized,
{
    fn save(&self, correction: ResourceCorrection) -> Result<ResourceCorrection, ValidationErrors> {
        (**self).save(correction)
    }

    fn list_for_resource(&self, resource: &ResourceId) -> Vec<ResourceCorrection> {
        (**self).list_for_resource(resource)
    }
}

impl<N> NumberGenerator for Arc<N>
where
    N: NumberGenerator + ?Sized,
{
    fn generate_number(&self, model: ModelIdentifier) -> String {
        (**self).generate_number(model)
    }
}
