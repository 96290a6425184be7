//! Event topic and source constants

pub const TOOL_RECOMMENDED: &str = "tool/recommended";
pub const TOOL_EVALUATED: &str = "tool/evaluated";
pub const TOOL_DISCOVERED: &str = "tool/discovered";
pub const VERSION_CREATED: &str = "tool/version_created";
pub const VERSION_STATUS_CHANGED: &str = "tool/version_status_changed";
pub const MODEL_REQUEST_COMPLETED: &str = "model/request_completed";

pub mod sources {
    pub const CURATOR: &str = "curator";
    pub const EVALUATOR: &str = "evaluator";
    pub const REGISTRY: &str = "registry";
    pub const VERSIONING: &str = "versioning";
    pub const MODEL_SERVICE: &str = "model_service";
}
