use serde::{Deserialize, Serialize};

use mes_core::{Entity, ModelIdentifier, ProductId, Validate, ValidationErrors};

use crate::constants::MODEL_PRODUCT;

/// Persisted field names of the product model.
pub struct ProductFields;

impl ProductFields {
    pub const NUMBER: &'static str = "number";
    pub const NAME: &'static str = "name";
    pub const UNIT: &'static str = "unit";
    pub const ADDITIONAL_UNIT: &'static str = "additionalUnit";
}

/// A product as registered in the basic plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    number: String,
    name: String,
    unit: String,
    additional_unit: Option<String>,
}

impl Product {
    pub fn new(
        id: ProductId,
        number: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            name: name.into(),
            unit: unit.into(),
            additional_unit: None,
        }
    }

    pub fn with_additional_unit(mut self, unit: impl Into<String>) -> Self {
        self.additional_unit = Some(unit.into());
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn additional_unit(&self) -> Option<&str> {
        self.additional_unit.as_deref()
    }

    /// Summary served to lookup grids.
    pub fn to_dto(&self) -> ProductDto {
        ProductDto {
            id: self.id,
            number: self.number.clone(),
            name: self.name.clone(),
            unit: self.unit.clone(),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    const MODEL: ModelIdentifier = MODEL_PRODUCT;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.number.trim().is_empty() {
            errors.add(ProductFields::NUMBER, "cannot be empty");
        }
        if self.name.trim().is_empty() {
            errors.add(ProductFields::NAME, "cannot be empty");
        }
        if self.unit.trim().is_empty() {
            errors.add(ProductFields::UNIT, "cannot be empty");
        }
        if self.additional_unit.as_deref() == Some(self.unit.as_str()) {
            errors.add(ProductFields::ADDITIONAL_UNIT, "must differ from unit");
        }
        errors.into_result()
    }
}

/// Product summary record returned by lookup listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub number: String,
    pub name: String,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_product_passes_validation() {
        let product = Product::new(ProductId::new(), "P-001", "Steel sheet", "kg")
            .with_additional_unit("pcs");
        assert!(product.validate().is_ok());
        assert_eq!(product.additional_unit(), Some("pcs"));
    }

    #[test]
    fn blank_fields_are_reported_by_persisted_name() {
        let product = Product::new(ProductId::new(), " ", "", "kg");
        let errors = product.validate().unwrap_err();

        assert!(errors.has_error_for("number"));
        assert!(errors.has_error_for("name"));
        assert!(!errors.has_error_for("unit"));
    }

    #[test]
    fn additional_unit_must_differ_from_unit() {
        let product = Product::new(ProductId::new(), "P-1", "Bolt", "pcs").with_additional_unit("pcs");
        let errors = product.validate().unwrap_err();
        assert!(errors.has_error_for("additionalUnit"));
    }

    #[test]
    fn dto_carries_summary_fields() {
        let id = ProductId::new();
        let dto = Product::new(id, "P-7", "Nut", "pcs").to_dto();
        assert_eq!(dto.id, id);
        assert_eq!(dto.number, "P-7");
        assert_eq!(dto.name, "Nut");
        assert_eq!(dto.unit, "pcs");
    }
}
