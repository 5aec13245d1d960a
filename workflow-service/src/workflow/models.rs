use crate::{ServiceError, ServiceResult};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Value;

use std::collections::BTreeMap;

/// A generated GitHub Actions workflow document.
///
/// Field order matches the order the keys are emitted in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workflow {
    /// The name of the workflow (displayed in GitHub Actions UI)
    pub name: String,

    /// The trigger configuration for the workflow
    #[serde(rename = "on")]
    pub on: Trigger,

    /// The jobs that make up this workflow, in generation order
    pub jobs: JobMap,
}

/// Trigger configuration for when the workflow should run.
///
/// - Simple: `on: push`
/// - List: `on: [push, pull_request]`
/// - Detailed: `on: { push: { branches: [main] } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    /// Single event trigger: `on: push`
    Single(String),

    /// Multiple events: `on: [push, pull_request]`
    Multiple(Vec<String>),

    /// Per-event configuration, passed through verbatim; events are key-sorted
    Detailed(BTreeMap<String, Option<Value>>),
}

impl Default for Trigger {
    fn default() -> Self {
        Trigger::Single("push".to_string())
    }
}

/// Insertion-ordered map of job key to job.
///
/// Keys are unique: inserting a key that is already present is an error
/// rather than an overwrite, so a job can never be silently dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobMap {
    entries: Vec<(String, Job)>,
}

impl JobMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job under `key`, rejecting duplicate keys.
    pub fn insert(&mut self, key: impl Into<String>, job: Job) -> ServiceResult<()> {
        let key = key.into();
        if let Some(existing) = self.get(&key) {
            return Err(ServiceError::KeyCollision {
                key,
                first: existing.name.clone(),
                second: job.name,
            });
        }
        self.entries.push((key, job));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Job> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, job)| job)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Job)> {
        self.entries.iter().map(|(k, job)| (k.as_str(), job))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every job of `other`, failing on the first duplicate key.
    pub fn extend(&mut self, other: JobMap) -> ServiceResult<()> {
        for (key, job) in other.entries {
            self.insert(key, job)?;
        }
        Ok(())
    }
}

impl Serialize for JobMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, job) in &self.entries {
            map.serialize_entry(key, job)?;
        }
        map.end()
    }
}

/// A job within a workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    /// Display name for the job
    pub name: String,

    /// Runner label
    #[serde(rename = "runs-on")]
    pub runs_on: String,

    /// Key of the job that must complete before this job runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs: Option<String>,

    /// The steps that make up this job
    pub steps: Vec<Step>,

    /// Service containers, keyed by service name; configs are passed through verbatim
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, Value>,

    /// Job-level environment variables
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Job {
    pub fn new(name: impl Into<String>, runs_on: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs_on: runs_on.into(),
            needs: None,
            steps: Vec::new(),
            services: BTreeMap::new(),
            env: BTreeMap::new(),
        }
    }
}

/// A step within a job.
///
/// Every GitHub Actions step key is modelled, so steps read from a
/// descriptor are emitted exactly as written. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Unique identifier for the step (used in outputs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name for the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Conditional expression for step execution
    #[serde(default, rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_condition: Option<String>,

    /// Action to use (e.g., "actions/checkout@master")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,

    /// Inputs to pass to the action
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub with: BTreeMap<String, Value>,

    /// Shell command to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    /// Shell to use for the run command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Working directory for the step
    #[serde(
        default,
        rename = "working-directory",
        skip_serializing_if = "Option::is_none"
    )]
    pub working_directory: Option<String>,

    /// Step-level environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Whether to continue the job if this step fails; a bool or an expression
    #[serde(
        default,
        rename = "continue-on-error",
        skip_serializing_if = "Option::is_none"
    )]
    pub continue_on_error: Option<Value>,

    /// Step timeout in minutes; a number or an expression
    #[serde(
        default,
        rename = "timeout-minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_minutes: Option<Value>,
}
