use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mes_core::{LocationId, ProductId};

/// Aggregate on-hand quantity of a product at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStock {
    pub product: ProductId,
    pub location: LocationId,
    pub quantity: Decimal,
}

impl ResourceStock {
    pub fn empty(product: ProductId, location: LocationId) -> Self {
        Self {
            product,
            location,
            quantity: Decimal::ZERO,
        }
    }
}

/// Aggregate stock bookkeeping, tracked independently of individual resources.
///
/// Amounts are non-negative; a zero amount is a valid no-op adjustment.
pub trait ResourceStockService: Send + Sync {
    fn add_resource_stock(&self, product: ProductId, location: LocationId, amount: Decimal);
    fn remove_resource_stock(&self, product: ProductId, location: LocationId, amount: Decimal);
}

impl<S> ResourceStockService for Arc<S>
where
    S: ResourceStockService + ?Sized,
{
    fn add_resource_stock(&self, product: ProductId, location: LocationId, amount: Decimal) {
        (**self).add_resource_stock(product, location, amount)
    }

    fn remove_resource_stock(&self, product: ProductId, location: LocationId, amount: Decimal) {
        (**self).remove_resource_stock(product, location, amount)
    }
}
