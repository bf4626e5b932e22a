//! Plugin + model keys used to address stored entities and number sequences.

use serde::Serialize;

/// Identifies a model inside a plugin (e.g. `materialFlowResources` / `resource`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModelIdentifier {
    pub plugin: &'static str,
    pub model: &'static str,
}

impl ModelIdentifier {
    pub const fn new(plugin: &'static str, model: &'static str) -> Self {
        Self { plugin, model }
    }
}

impl core::fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.plugin, self.model)
    }
}
