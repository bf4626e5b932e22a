use mes_core::ModelIdentifier;

pub const PLUGIN_IDENTIFIER: &str = "materialFlowResources";

pub const MODEL_RESOURCE: ModelIdentifier = ModelIdentifier::new(PLUGIN_IDENTIFIER, "resource");

pub const MODEL_RESOURCE_CORRECTION: ModelIdentifier =
    ModelIdentifier::new(PLUGIN_IDENTIFIER, "resourceCorrection");
