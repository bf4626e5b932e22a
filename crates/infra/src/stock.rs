use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use mes_core::{LocationId, ProductId};
use mes_material_flow_resources::{ResourceStock, ResourceStockService};

/// In-memory aggregate stock per (product, location).
#[derive(Debug, Default)]
pub struct InMemoryResourceStockService {
    inner: RwLock<HashMap<(ProductId, LocationId), Decimal>>,
}

impl InMemoryResourceStockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stock; zero for a product never booked at the location.
    pub fn get(&self, product: ProductId, location: LocationId) -> ResourceStock {
        let booked = self
            .inner
            .read()
            .ok()
            .and_then(|map| map.get(&(product, location)).copied());
        match booked {
            Some(quantity) => ResourceStock {
                product,
                location,
                quantity,
            },
            None => ResourceStock::empty(product, location),
        }
    }

    pub fn list(&self) -> Vec<ResourceStock> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.iter()
            .map(|(&(product, location), &quantity)| ResourceStock {
                product,
                location,
                quantity,
            })
            .collect()
    }

    fn adjust(&self, product: ProductId, location: LocationId, delta: Decimal) {
        if let Ok(mut map) = self.inner.write() {
            let quantity = map.entry((product, location)).or_insert(Decimal::ZERO);
            *quantity += delta;
            if *quantity < Decimal::ZERO {
                tracing::warn!(
                    product = %product,
                    location = %location,
                    quantity = %quantity,
                    "resource stock went negative"
                );
            }
        }
    }
}

impl ResourceStockService for InMemoryResourceStockService {
    fn add_resource_stock(&self, product: ProductId, location: LocationId, amount: Decimal) {
        tracing::debug!(product = %product, location = %location, amount = %amount, "adding resource stock");
        self.adjust(product, location, amount);
    }

    fn remove_resource_stock(&self, product: ProductId, location: LocationId, amount: Decimal) {
        tracing::debug!(product = %product, location = %location, amount = %amount, "removing resource stock");
        self.adjust(product, location, -amount);
    }
}
