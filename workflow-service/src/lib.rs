// Workflow Service Library
// Generates GitHub Actions test workflows from declarative descriptor tables

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod workflow;

// Re-export commonly used types
pub use error::{ServiceError, ServiceResult};

// Re-export builder types
pub use builder::{build_workflow, normalize_key, JobGraphBuilder};

// Re-export descriptor types
pub use descriptor::{
    default_descriptor, AxisValue, Descriptor, DescriptorLoader, ServiceDefinition,
    SuiteDefinition,
};

// Re-export workflow types
pub use workflow::{Job, JobMap, OutputFormat, Step, Trigger, Workflow, WorkflowRenderer};
