use std::cmp::Ordering;
use std::hash::Hash;
use std::marker::PhantomData;

use mes_basic::lookup::sort_products;
use mes_basic::{Product, ProductDataProvider, ProductDto, ProductSortField, SortOrder};
use mes_core::{Entity, ResourceId, Validate, ValidationErrors};
use mes_material_flow_resources::{
    Resource, ResourceCorrection, ResourceCorrectionRepository, ResourceRepository,
};

use super::in_memory::{InMemoryStore, Store};

/// Entity store: runs validation on save and only writes valid entities.
#[derive(Debug)]
pub struct EntityStore<E, S> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

/// Entity store backed by memory.
pub type InMemoryEntityStore<E> = EntityStore<E, InMemoryStore<<E as Entity>::Id, E>>;

impl<E> EntityStore<E, InMemoryStore<E::Id, E>>
where
    E: Entity,
{
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl<E> Default for EntityStore<E, InMemoryStore<E::Id, E>>
where
    E: Entity,
{
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<E, S> EntityStore<E, S>
where
    E: Entity,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }
}

impl<E, S> EntityStore<E, S>
where
    E: Entity + Validate + Clone,
    E::Id: Send + Sync + Hash,
    S: Store<E::Id, E>,
{
    pub fn get(&self, id: &E::Id) -> Option<E> {
        self.store.get(id)
    }

    /// Validate and persist. Invalid entities are not written.
    pub fn save(&self, entity: E) -> Result<E, ValidationErrors> {
        let model = E::MODEL;
        if let Err(errors) = entity.validate() {
            tracing::debug!(model = %model, id = ?entity.id(), errors = %errors, "entity rejected");
            return Err(errors);
        }
        self.store.upsert(entity.id().clone(), entity.clone());
        tracing::trace!(model = %model, id = ?entity.id(), "entity saved");
        Ok(entity)
    }

    pub fn list(&self) -> Vec<E> {
        self.store.list()
    }
}

/// Generated numbers are zero-padded but may outgrow their width: shorter sorts first.
fn number_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl<S> ResourceRepository for EntityStore<Resource, S>
where
    S: Store<ResourceId, Resource>,
{
    fn find(&self, id: &ResourceId) -> Option<Resource> {
        self.get(id)
    }

    fn save(&self, resource: Resource) -> Result<Resource, ValidationErrors> {
        EntityStore::save(self, resource)
    }

    fn list(&self) -> Vec<Resource> {
        let mut resources = EntityStore::list(self);
        resources.sort_by(|a, b| number_order(a.number(), b.number()));
        resources
    }
}

impl<S> ResourceCorrectionRepository for EntityStore<ResourceCorrection, S>
where
    S: Store<<ResourceCorrection as Entity>::Id, ResourceCorrection>,
{
    fn save(&self, correction: ResourceCorrection) -> Result<ResourceCorrection, ValidationErrors> {
        EntityStore::save(self, correction)
    }

    /// Corrections of one resource in number order.
    fn list_for_resource(&self, resource: &ResourceId) -> Vec<ResourceCorrection> {
        let mut corrections: Vec<_> = EntityStore::list(self)
            .into_iter()
            .filter(|c| c.resource() == *resource)
            .collect();
        corrections.sort_by(|a, b| number_order(a.number(), b.number()));
        corrections
    }
}

impl<S> ProductDataProvider for EntityStore<Product, S>
where
    S: Store<<Product as Entity>::Id, Product>,
{
    fn all_products(&self, field: ProductSortField, order: SortOrder) -> Vec<ProductDto> {
        let mut records: Vec<ProductDto> = EntityStore::list(self).iter().map(Product::to_dto).collect();
        sort_products(&mut records, field, order);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use mes_core::{LocationId, ProductId};
    use rust_decimal_macros::dec;

    fn resource(number: &str) -> Resource {
        Resource::new(
            ResourceId::new(),
            number,
            ProductId::new(),
            LocationId::new(),
            dec!(5),
            Utc::now(),
        )
    }

    #[test]
    fn invalid_entity_is_not_written() {
        let store: InMemoryEntityStore<Resource> = EntityStore::in_memory();
        let invalid = resource("000001").with_reserved_quantity(dec!(9));

        let errors = ResourceRepository::save(&store, invalid.clone()).unwrap_err();
        assert!(errors.has_error_for("availableQuantity"));
        assert!(store.find(&invalid.id_typed()).is_none());
    }

    #[test]
    fn resources_list_in_number_order() {
        let store: InMemoryEntityStore<Resource> = EntityStore::in_memory();
        for n in ["000003", "000001", "000002"] {
            ResourceRepository::save(&store, resource(n)).unwrap();
        }

        let numbers: Vec<String> = ResourceRepository::list(&store)
            .iter()
            .map(|r| r.number().to_string())
            .collect();
        assert_eq!(numbers, vec!["000001", "000002", "000003"]);
    }

    #[test]
    fn numbers_past_the_padding_width_sort_last() {
        let store: InMemoryEntityStore<Resource> = EntityStore::in_memory();
        for n in ["1000000", "999999", "000002"] {
            ResourceRepository::save(&store, resource(n)).unwrap();
        }

        let numbers: Vec<String> = ResourceRepository::list(&store)
            .iter()
            .map(|r| r.number().to_string())
            .collect();
        assert_eq!(numbers, vec!["000002", "999999", "1000000"]);
    }

    #[test]
    fn product_provider_sorts_summaries() {
        let store: InMemoryEntityStore<Product> = EntityStore::in_memory();
        store.save(Product::new(ProductId::new(), "P-2", "Bolt", "pcs")).unwrap();
        store.save(Product::new(ProductId::new(), "P-1", "Washer", "pcs")).unwrap();
        assert!(store.save(Product::new(ProductId::new(), "", "Nameless", "pcs")).is_err());

        let records = store.all_products(ProductSortField::Name, SortOrder::Desc);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Washer", "Bolt"]);
    }
}
