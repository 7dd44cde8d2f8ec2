use thiserror::Error;

pub type Result<T> = std::result::Result<T, PorticoError>;

#[derive(Debug, Error)]
pub enum PorticoError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("No controller bound under name '{name}'")]
    ControllerNotFound { name: String },

    #[error("No request handler registered for identifier '{id}'")]
    HandlerNotFound { id: String },

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidRoutePattern { pattern: String, reason: String },

    #[error("Invalid HTTP method '{verb}'")]
    InvalidMethod { verb: String },
}
