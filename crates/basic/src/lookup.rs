//! Generic lookup (picker grid) support for products.
//!
//! A lookup exposes three things to the UI:
//! - the view to open (`genericLookup` for a given record name),
//! - the grid column configuration,
//! - the sorted (optionally paged) records.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::Serialize;

use mes_core::{DomainError, DomainResult};

use crate::product::ProductDto;

/// Name of the generic lookup view opened by pickers.
pub const GENERIC_LOOKUP_VIEW: &str = "genericLookup";

/// Hidden key column that every lookup grid carries.
pub const KEY_COLUMN: &str = "id";

/// Visible columns of the product lookup grid.
pub const PRODUCT_LOOKUP_COLUMNS: [&str; 2] = ["number", "name"];

/// Sort direction (`sord` query parameter).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::validation(format!(
                "sort order must be one of: asc, desc (got '{other}')"
            ))),
        }
    }
}

/// Field a product listing can be sorted by (`sidx` query parameter).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProductSortField {
    Id,
    Number,
    Name,
    Unit,
}

impl ProductSortField {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductSortField::Id => "id",
            ProductSortField::Number => "number",
            ProductSortField::Name => "name",
            ProductSortField::Unit => "unit",
        }
    }

    fn compare(self, a: &ProductDto, b: &ProductDto) -> Ordering {
        match self {
            ProductSortField::Id => a.id.cmp(&b.id),
            ProductSortField::Number => a.number.cmp(&b.number),
            ProductSortField::Name => a.name.cmp(&b.name),
            ProductSortField::Unit => a.unit.cmp(&b.unit),
        }
    }
}

impl FromStr for ProductSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ProductSortField::Id),
            "number" => Ok(ProductSortField::Number),
            "name" => Ok(ProductSortField::Name),
            "unit" => Ok(ProductSortField::Unit),
            other => Err(DomainError::validation(format!(
                "cannot sort products by '{other}'"
            ))),
        }
    }
}

/// Sort product records in place. Ties are broken by id so listings are stable.
pub fn sort_products(records: &mut [ProductDto], field: ProductSortField, order: SortOrder) {
    records.sort_by(|a, b| {
        order.apply(field.compare(a, b).then_with(|| a.id.cmp(&b.id)))
    });
}

/// 1-based page of `rows` records.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub page: usize,
    pub rows: usize,
}

impl Page {
    pub fn new(page: usize, rows: usize) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::validation("page must be at least 1"));
        }
        if rows == 0 {
            return Err(DomainError::validation("rows must be at least 1"));
        }
        Ok(Self { page, rows })
    }

    fn slice<T>(self, records: Vec<T>) -> Vec<T> {
        let skip = (self.page - 1).saturating_mul(self.rows);
        records.into_iter().skip(skip).take(self.rows).collect()
    }
}

/// One column of a lookup grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridColumn {
    pub name: String,
    pub index: String,
    pub key: bool,
    pub hidden: bool,
}

/// Column configuration consumed by the generic grid widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub col_names: Vec<String>,
    pub col_model: Vec<GridColumn>,
    pub sortname: String,
    pub sortorder: SortOrder,
}

impl GridConfig {
    /// Build the config for the given visible columns.
    ///
    /// The hidden key column comes first; the grid sorts by the first visible
    /// column ascending.
    pub fn for_columns(columns: &[&str]) -> Self {
        let mut col_model = vec![GridColumn {
            name: KEY_COLUMN.to_string(),
            index: KEY_COLUMN.to_string(),
            key: true,
            hidden: true,
        }];
        col_model.extend(columns.iter().map(|c| GridColumn {
            name: (*c).to_string(),
            index: (*c).to_string(),
            key: false,
            hidden: false,
        }));

        Self {
            col_names: col_model.iter().map(|c| c.name.clone()).collect(),
            sortname: columns.first().copied().unwrap_or(KEY_COLUMN).to_string(),
            sortorder: SortOrder::Asc,
            col_model,
        }
    }

    /// Names of the columns shown to the user.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.col_model
            .iter()
            .filter(|c| !c.hidden)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Descriptor of the view a picker opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupView {
    pub view: &'static str,
    pub record_name: &'static str,
}

/// Source of product summary records (backed by the entity store).
pub trait ProductDataProvider: Send + Sync {
    fn all_products(&self, field: ProductSortField, order: SortOrder) -> Vec<ProductDto>;
}

impl<P> ProductDataProvider for std::sync::Arc<P>
where
    P: ProductDataProvider + ?Sized,
{
    fn all_products(&self, field: ProductSortField, order: SortOrder) -> Vec<ProductDto> {
        (**self).all_products(field, order)
    }
}

/// Product lookup: parses grid query parameters and delegates retrieval.
#[derive(Debug)]
pub struct ProductLookup<P> {
    provider: P,
}

impl<P> ProductLookup<P>
where
    P: ProductDataProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn lookup_view(&self) -> LookupView {
        LookupView {
            view: GENERIC_LOOKUP_VIEW,
            record_name: "product",
        }
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::for_columns(&PRODUCT_LOOKUP_COLUMNS)
    }

    /// Records sorted by `sidx`/`sord` (defaults: `number`, `asc`), optionally paged.
    pub fn records(
        &self,
        sidx: Option<&str>,
        sord: Option<&str>,
        page: Option<Page>,
    ) -> DomainResult<Vec<ProductDto>> {
        let field = match sidx {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => ProductSortField::Number,
        };
        let order = match sord {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => SortOrder::Asc,
        };

        tracing::debug!(sidx = field.as_str(), sord = order.as_str(), "listing product records");

        let records = self.provider.all_products(field, order);
        Ok(match page {
            Some(p) => p.slice(records),
            None => records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mes_core::ProductId;
    use proptest::prelude::*;

    fn dto(number: &str, name: &str) -> ProductDto {
        ProductDto {
            id: ProductId::new(),
            number: number.to_string(),
            name: name.to_string(),
            unit: "pcs".to_string(),
        }
    }

    struct FixedProvider(Vec<ProductDto>);

    impl ProductDataProvider for FixedProvider {
        fn all_products(&self, field: ProductSortField, order: SortOrder) -> Vec<ProductDto> {
            let mut records = self.0.clone();
            sort_products(&mut records, field, order);
            records
        }
    }

    fn lookup() -> ProductLookup<FixedProvider> {
        ProductLookup::new(FixedProvider(vec![
            dto("P-2", "Bolt"),
            dto("P-3", "Anchor"),
            dto("P-1", "Chain"),
        ]))
    }

    fn numbers(records: &[ProductDto]) -> Vec<&str> {
        records.iter().map(|r| r.number.as_str()).collect()
    }

    #[test]
    fn sort_order_parses_case_insensitively() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn records_sort_by_requested_field_and_direction() {
        let l = lookup();

        let by_number = l.records(Some("number"), Some("asc"), None).unwrap();
        assert_eq!(numbers(&by_number), vec!["P-1", "P-2", "P-3"]);

        let by_name_desc = l.records(Some("name"), Some("desc"), None).unwrap();
        assert_eq!(numbers(&by_name_desc), vec!["P-1", "P-2", "P-3"]);

        let by_name = l.records(Some("name"), Some("asc"), None).unwrap();
        assert_eq!(numbers(&by_name), vec!["P-3", "P-2", "P-1"]);
    }

    #[test]
    fn records_default_to_number_ascending() {
        let records = lookup().records(None, None, None).unwrap();
        assert_eq!(numbers(&records), vec!["P-1", "P-2", "P-3"]);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = lookup().records(Some("price"), Some("asc"), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn records_are_paged_after_sorting() {
        let l = lookup();
        let page = Page::new(2, 2).unwrap();
        let records = l.records(Some("number"), Some("asc"), Some(page)).unwrap();
        assert_eq!(numbers(&records), vec!["P-3"]);

        let past_end = Page::new(5, 2).unwrap();
        assert!(l.records(None, None, Some(past_end)).unwrap().is_empty());
    }

    #[test]
    fn page_rejects_zero_values() {
        assert!(Page::new(0, 10).is_err());
        assert!(Page::new(1, 0).is_err());
    }

    #[test]
    fn config_names_visible_number_and_name_columns() {
        let config = lookup().config();
        assert_eq!(config.visible_columns(), vec!["number", "name"]);
        assert_eq!(config.col_names, vec!["id", "number", "name"]);
        assert_eq!(config.sortname, "number");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["colModel"][0]["key"], true);
        assert_eq!(json["colModel"][0]["hidden"], true);
        assert_eq!(json["sortorder"], "asc");
    }

    #[test]
    fn lookup_view_opens_generic_lookup_for_products() {
        let view = lookup().lookup_view();
        assert_eq!(view.view, "genericLookup");
        assert_eq!(view.record_name, "product");
    }

    proptest! {
        /// Property: descending order is the exact reverse of ascending order.
        #[test]
        fn desc_is_reverse_of_asc(names in prop::collection::vec("[A-Za-z]{1,8}", 0..20)) {
            let records: Vec<ProductDto> = names.iter().map(|n| dto(n, n)).collect();

            let mut asc = records.clone();
            sort_products(&mut asc, ProductSortField::Name, SortOrder::Asc);
            let mut desc = records;
            sort_products(&mut desc, ProductSortField::Name, SortOrder::Desc);

            desc.reverse();
            prop_assert_eq!(asc, desc);
        }
    }
}
