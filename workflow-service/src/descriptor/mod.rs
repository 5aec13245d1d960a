// Descriptor module
// Input tables for workflow generation: models, YAML loader and the built-in catalog

pub mod catalog;
pub mod loader;
pub mod models;

pub use catalog::default_descriptor;
pub use loader::DescriptorLoader;
pub use models::{AxisValue, Descriptor, ServiceDefinition, SuiteDefinition};
