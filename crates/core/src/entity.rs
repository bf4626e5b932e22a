//! Entity trait: identity + continuity across state changes.

use crate::error::ValidationErrors;
use crate::model::ModelIdentifier;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Plugin + model key under which the entity is stored.
    const MODEL: ModelIdentifier;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Validation rules an entity store runs before accepting a save.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
