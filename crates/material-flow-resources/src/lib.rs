//! Material flow resources: warehouse resources and their corrections.
//!
//! Business rules only. Storage, number sequences and aggregate stock are
//! collaborators injected into [`ResourceCorrectionService`]; the
//! infrastructure crate provides in-memory implementations.

pub mod constants;
pub mod correction;
pub mod fields;
pub mod repository;
pub mod resource;
pub mod service;
pub mod stock;

pub use correction::{ChangeSet, CorrectionProposal, ResourceCorrection};
pub use fields::{ResourceCorrectionFields, ResourceFields};
pub use repository::{NumberGenerator, ResourceCorrectionRepository, ResourceRepository};
pub use resource::Resource;
pub use service::{CorrectionError, CorrectionOutcome, ResourceCorrectionService};
pub use stock::{ResourceStock, ResourceStockService};
