// Service error types
// A single error enum shared by the descriptor loader, the job graph builder
// and the workflow renderer

use thiserror::Error;

/// Result type for workflow service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A suite (or axis) requires a service that is not in the service table
    #[error("suite '{suite}' requires unknown service '{service}'")]
    UnknownService { suite: String, service: String },

    /// Two distinct jobs normalize to the same job key
    #[error("job key '{key}' is produced by both '{first}' and '{second}'")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },

    /// A descriptor is missing a required field or is otherwise unusable
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),

    /// The generated workflow failed a structural check
    #[error("invalid workflow: {0}")]
    InvalidWorkflow(String),

    #[error("yaml error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ServiceError::MalformedDescriptor(message.into())
    }

    pub fn invalid_workflow(message: impl Into<String>) -> Self {
        ServiceError::InvalidWorkflow(message.into())
    }
}
