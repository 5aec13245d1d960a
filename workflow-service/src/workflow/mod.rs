pub mod models;
pub mod render;

pub use models::{Job, JobMap, Step, Trigger, Workflow};
pub use render::{OutputFormat, WorkflowRenderer};
