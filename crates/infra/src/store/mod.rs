//! Entity storage: a key/value backend plus a validating entity store on top.

pub mod entity;
pub mod in_memory;

pub use entity::{EntityStore, InMemoryEntityStore};
pub use in_memory::{InMemoryStore, Store};
