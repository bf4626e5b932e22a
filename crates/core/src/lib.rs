//! `mes-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the MES plugins
//! (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod model;

pub use entity::{Entity, Validate};
pub use error::{DomainError, DomainResult, FieldError, ValidationErrors};
pub use id::{
    DeliveryId, DeliveryStateChangeId, LocationId, ProductId, ResourceCorrectionId, ResourceId,
    StorageLocationId,
};
pub use model::ModelIdentifier;
