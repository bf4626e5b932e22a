//! Basic plugin: products and the generic lookup used to pick them.
//!
//! Pure domain logic (no IO, no HTTP, no storage). Record retrieval is
//! delegated to a [`ProductDataProvider`] supplied by the infrastructure layer.

pub mod constants;
pub mod lookup;
pub mod product;

pub use lookup::{
    GridColumn, GridConfig, LookupView, Page, ProductDataProvider, ProductLookup, ProductSortField,
    SortOrder,
};
pub use product::{Product, ProductDto, ProductFields};
