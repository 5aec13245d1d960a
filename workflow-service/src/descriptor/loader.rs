use crate::descriptor::models::Descriptor;
use crate::ServiceResult;

use std::fs;
use std::path::Path;

/// Loader for descriptor YAML files.
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// Load and validate a descriptor from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ServiceResult<Descriptor> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading descriptor");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a descriptor from a YAML string.
    pub fn parse(content: &str) -> ServiceResult<Descriptor> {
        let descriptor: Descriptor = serde_yaml::from_str(content)?;
        descriptor.validate()?;
        Ok(descriptor)
    }
}
