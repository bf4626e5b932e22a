use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use mes_basic::{Product, ProductLookup};
use mes_core::{LocationId, ProductId, ResourceId, ValidationErrors};
use mes_infra::{EntityStore, InMemoryEntityStore, InMemoryResourceStockService, SequenceNumberGenerator};
use mes_material_flow_resources::constants::MODEL_RESOURCE;
use mes_material_flow_resources::{
    CorrectionError, CorrectionOutcome, CorrectionProposal, NumberGenerator, Resource,
    ResourceCorrection, ResourceCorrectionRepository, ResourceCorrectionService,
    ResourceRepository, ResourceStock, ResourceStockService,
};

use crate::app::dto;

type ProductStore = Arc<InMemoryEntityStore<Product>>;
type ResourceStore = Arc<InMemoryEntityStore<Resource>>;
type CorrectionStore = Arc<InMemoryEntityStore<ResourceCorrection>>;

type InMemoryCorrectionService = ResourceCorrectionService<
    ResourceStore,
    CorrectionStore,
    Arc<SequenceNumberGenerator>,
    Arc<InMemoryResourceStockService>,
>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("product {0} does not exist")]
    UnknownProduct(ProductId),

    #[error("resource {0} not found")]
    ResourceNotFound(ResourceId),

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl From<CorrectionError> for ServiceError {
    fn from(value: CorrectionError) -> Self {
        match value {
            CorrectionError::ResourceNotFound(id) => ServiceError::ResourceNotFound(id),
        }
    }
}

/// Application services shared by all handlers.
pub struct AppServices {
    products: ProductStore,
    resources: ResourceStore,
    corrections: CorrectionStore,
    numbers: Arc<SequenceNumberGenerator>,
    stock: Arc<InMemoryResourceStockService>,
    lookup: ProductLookup<ProductStore>,
    correction_service: InMemoryCorrectionService,
}

impl AppServices {
    /// Wire everything on in-memory infrastructure.
    pub fn in_memory() -> Self {
        let products: ProductStore = Arc::new(EntityStore::in_memory());
        let resources: ResourceStore = Arc::new(EntityStore::in_memory());
        let corrections: CorrectionStore = Arc::new(EntityStore::in_memory());
        let numbers = Arc::new(SequenceNumberGenerator::new());
        let stock = Arc::new(InMemoryResourceStockService::new());

        let correction_service = ResourceCorrectionService::new(
            resources.clone(),
            corrections.clone(),
            numbers.clone(),
            stock.clone(),
        );

        Self {
            lookup: ProductLookup::new(products.clone()),
            products,
            resources,
            corrections,
            numbers,
            stock,
            correction_service,
        }
    }

    pub fn product_lookup(&self) -> &ProductLookup<ProductStore> {
        &self.lookup
    }

    pub fn register_product(&self, req: dto::RegisterProductRequest) -> Result<Product, ServiceError> {
        let mut product = Product::new(ProductId::new(), req.number, req.name, req.unit);
        if let Some(unit) = req.additional_unit {
            product = product.with_additional_unit(unit);
        }
        let product = self.products.save(product)?;
        tracing::info!(product_id = %product.id_typed(), number = product.number(), "product registered");
        Ok(product)
    }

    /// Store a new numbered resource and book its quantity into aggregate stock.
    pub fn register_resource(&self, req: dto::RegisterResourceRequest) -> Result<Resource, ServiceError> {
        if self.products.get(&req.product).is_none() {
            return Err(ServiceError::UnknownProduct(req.product));
        }

        let number = self.numbers.generate_number(MODEL_RESOURCE);
        let mut resource = Resource::new(
            ResourceId::new(),
            number,
            req.product,
            req.location,
            req.quantity,
            Utc::now(),
        );
        if let Some(price) = req.price {
            resource = resource.with_price(price);
        }
        if let Some(storage_location) = req.storage_location {
            resource = resource.with_storage_location(storage_location);
        }
        if let Some(batch) = req.batch {
            resource = resource.with_batch(batch);
        }
        if let Some(conversion) = req.conversion {
            resource = resource.with_conversion(conversion);
        }
        if let Some(reserved) = req.reserved_quantity {
            resource = resource.with_reserved_quantity(reserved);
        }

        let resource = self.resources.save(resource)?;
        self.stock
            .add_resource_stock(resource.product(), resource.location(), resource.quantity());

        tracing::info!(
            resource_id = %resource.id_typed(),
            number = resource.number(),
            quantity = %resource.quantity(),
            "resource registered"
        );
        Ok(resource)
    }

    pub fn resources(&self) -> Vec<Resource> {
        self.resources.list()
    }

    pub fn resource(&self, id: &ResourceId) -> Option<Resource> {
        self.resources.find(id)
    }

    /// Correct a stored resource to the requested values.
    pub fn correct_resource(
        &self,
        id: &ResourceId,
        proposal: CorrectionProposal,
    ) -> Result<CorrectionOutcome, ServiceError> {
        let mut resource = self
            .resources
            .find(id)
            .ok_or(ServiceError::ResourceNotFound(*id))?;
        Ok(self.correction_service.correct(&mut resource, proposal)?)
    }

    pub fn corrections_for(&self, id: &ResourceId) -> Vec<ResourceCorrection> {
        self.corrections.list_for_resource(id)
    }

    pub fn stock(&self, product: ProductId, location: LocationId) -> ResourceStock {
        self.stock.get(product, location)
    }

    /// Stock levels ordered by product, then location.
    pub fn stock_levels(&self) -> Vec<ResourceStock> {
        let mut levels = self.stock.list();
        levels.sort_by_key(|s| (s.product, s.location));
        levels
    }
}
