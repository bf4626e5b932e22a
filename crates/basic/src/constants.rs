use mes_core::ModelIdentifier;

pub const PLUGIN_IDENTIFIER: &str = "basic";

pub const MODEL_PRODUCT: ModelIdentifier = ModelIdentifier::new(PLUGIN_IDENTIFIER, "product");
