//! Infrastructure layer: entity storage, number sequences, stock bookkeeping, config.

pub mod config;
pub mod numbering;
pub mod stock;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use numbering::SequenceNumberGenerator;
pub use stock::InMemoryResourceStockService;
pub use store::{EntityStore, InMemoryEntityStore, InMemoryStore, Store};
