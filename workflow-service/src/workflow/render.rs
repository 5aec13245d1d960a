use crate::workflow::models::Workflow;
use crate::{ServiceError, ServiceResult};

use std::fmt;

/// Markup a workflow can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// GitHub Actions YAML
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format '{}'. Valid formats: yaml, json",
                s
            )),
        }
    }
}

/// Renders generated workflows to markup.
pub struct WorkflowRenderer;

impl WorkflowRenderer {
    /// Validate and render a workflow in the given format.
    ///
    /// The whole document is rendered into memory, so a failure never
    /// leaves partial output behind.
    pub fn render(workflow: &Workflow, format: OutputFormat) -> ServiceResult<String> {
        Self::validate(workflow)?;
        match format {
            OutputFormat::Yaml => Self::to_yaml(workflow),
            OutputFormat::Json => Self::to_json(workflow),
        }
    }

    /// Render a workflow as YAML.
    pub fn to_yaml(workflow: &Workflow) -> ServiceResult<String> {
        Ok(serde_yaml::to_string(workflow)?)
    }

    /// Render a workflow as pretty-printed JSON.
    pub fn to_json(workflow: &Workflow) -> ServiceResult<String> {
        let mut json = serde_json::to_string_pretty(workflow)?;
        json.push('\n');
        Ok(json)
    }

    /// Validate a generated workflow for structural correctness.
    pub fn validate(workflow: &Workflow) -> ServiceResult<()> {
        if workflow.jobs.is_empty() {
            return Err(ServiceError::invalid_workflow("workflow has no jobs"));
        }

        for (job_id, job) in workflow.jobs.iter() {
            // Validate job dependencies exist
            if let Some(needed_job) = &job.needs {
                if needed_job == job_id {
                    return Err(ServiceError::invalid_workflow(format!(
                        "Job '{}' depends on itself",
                        job_id
                    )));
                }
                if !workflow.jobs.contains_key(needed_job) {
                    return Err(ServiceError::invalid_workflow(format!(
                        "Job '{}' depends on non-existent job '{}'",
                        job_id, needed_job
                    )));
                }
            }

            if job.steps.is_empty() {
                return Err(ServiceError::invalid_workflow(format!(
                    "Job '{}' has no steps",
                    job_id
                )));
            }

            if !is_valid_job_key(job_id) {
                return Err(ServiceError::invalid_workflow(format!(
                    "Job key '{}' must contain only alphanumeric characters, '-' or '_'",
                    job_id
                )));
            }
        }

        Ok(())
    }
}

fn is_valid_job_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
