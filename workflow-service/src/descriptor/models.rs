// Descriptor models
// The three input tables (services, suites, axis values) plus document settings

use crate::workflow::models::{Step, Trigger};
use crate::{ServiceError, ServiceResult};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use std::collections::{BTreeMap, HashSet};

/// Complete input for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Descriptor {
    /// Workflow display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Workflow trigger
    #[serde(default)]
    pub on: Trigger,

    /// Runner label every job runs on
    #[serde(default = "default_runs_on")]
    pub runs_on: String,

    /// Action used to check out the source
    #[serde(default = "default_checkout_action")]
    pub checkout_action: String,

    /// Action used to configure the runtime for an axis value
    #[serde(default = "default_setup_action")]
    pub setup_action: String,

    /// Input name the setup action takes the axis identifier under
    #[serde(default = "default_version_input")]
    pub version_input: String,

    /// Display label of the per-axis setup job
    #[serde(default = "default_setup_label")]
    pub setup_label: String,

    /// Command that installs declared dependencies
    #[serde(default = "default_install_command")]
    pub install_command: String,

    /// Prefix prepended to every suite command
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Matrix axis values, in generation order
    pub axes: Vec<AxisValue>,

    /// Service table keyed by symbolic name
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDefinition>,

    /// Test suites, in generation order
    #[serde(default)]
    pub suites: Vec<SuiteDefinition>,

    /// Suite names excluded from generation
    #[serde(default)]
    pub skip: Vec<String>,
}

fn default_name() -> String {
    "Test Rails".to_string()
}

fn default_runs_on() -> String {
    "ubuntu-latest".to_string()
}

fn default_checkout_action() -> String {
    "actions/checkout@master".to_string()
}

fn default_setup_action() -> String {
    "ruby/setup-ruby@v1".to_string()
}

fn default_version_input() -> String {
    "ruby-version".to_string()
}

fn default_setup_label() -> String {
    "Bundle Install".to_string()
}

fn default_install_command() -> String {
    "bundle install".to_string()
}

fn default_command_prefix() -> String {
    "bundle exec".to_string()
}

/// One point in the test matrix (e.g. one runtime version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisValue {
    /// Identifier passed to the runtime setup action
    pub id: String,

    /// Environment applied to every test job built for this value
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Extra inputs merged into the runtime setup step
    #[serde(default)]
    pub setup_with: BTreeMap<String, Value>,

    /// Services attached to every job built for this value
    #[serde(default)]
    pub services: Vec<String>,

    /// Append a dependency cache step to the setup job
    #[serde(default)]
    pub cache: bool,
}

impl AxisValue {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            env: BTreeMap::new(),
            setup_with: BTreeMap::new(),
            services: Vec::new(),
            cache: false,
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// An auxiliary backing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDefinition {
    /// Service container config, copied into jobs verbatim
    pub config: Value,

    /// Environment contributed to any job that uses the service
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// A named group of tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteDefinition {
    /// Display name
    pub name: String,

    /// Working directory the command runs in
    pub dir: String,

    /// Test command, run with the descriptor's command prefix
    pub command: String,

    /// Steps run after dependency install and before the command
    #[serde(default)]
    pub before: Vec<Step>,

    /// Required services, by symbolic name
    #[serde(default)]
    pub services: Vec<String>,

    /// Suite-level environment overrides
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl SuiteDefinition {
    pub fn new(
        name: impl Into<String>,
        dir: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            command: command.into(),
            before: Vec::new(),
            services: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_services(mut self, services: &[&str]) -> Self {
        self.services = services.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_before(mut self, before: Vec<Step>) -> Self {
        self.before = before;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

impl Descriptor {
    /// Create a descriptor with default document settings and no tables.
    pub fn new(axes: Vec<AxisValue>) -> Self {
        Self {
            name: default_name(),
            on: Trigger::default(),
            runs_on: default_runs_on(),
            checkout_action: default_checkout_action(),
            setup_action: default_setup_action(),
            version_input: default_version_input(),
            setup_label: default_setup_label(),
            install_command: default_install_command(),
            command_prefix: default_command_prefix(),
            axes,
            services: BTreeMap::new(),
            suites: Vec::new(),
            skip: Vec::new(),
        }
    }

    /// Look up a service definition by symbolic name.
    pub fn service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.get(name)
    }

    pub fn suite(&self, name: &str) -> Option<&SuiteDefinition> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// Suites that take part in generation, in declared order.
    pub fn active_suites(&self) -> impl Iterator<Item = &SuiteDefinition> {
        self.suites
            .iter()
            .filter(move |suite| !self.skip.contains(&suite.name))
    }

    /// Keep only the named suites. Every name must exist.
    ///
    /// Named suites run even if they were on the skip list.
    pub fn retain_suites(&mut self, names: &[String]) -> ServiceResult<()> {
        self.ensure_suites_exist(names)?;
        self.suites.retain(|suite| names.contains(&suite.name));
        self.skip.clear();
        Ok(())
    }

    /// Add names to the skip list. Every name must exist.
    pub fn skip_suites(&mut self, names: &[String]) -> ServiceResult<()> {
        self.ensure_suites_exist(names)?;
        for name in names {
            if !self.skip.contains(name) {
                self.skip.push(name.clone());
            }
        }
        Ok(())
    }

    fn ensure_suites_exist(&self, names: &[String]) -> ServiceResult<()> {
        match names.iter().find(|name| self.suite(name).is_none()) {
            Some(unknown) => Err(ServiceError::malformed(format!(
                "unknown suite '{}'",
                unknown
            ))),
            None => Ok(()),
        }
    }

    /// Check required fields before any job is built.
    ///
    /// Service references are resolved by the builder, which reports
    /// [`ServiceError::UnknownService`].
    pub fn validate(&self) -> ServiceResult<()> {
        if self.runs_on.trim().is_empty() {
            return Err(ServiceError::malformed("runner label is empty"));
        }

        if self.axes.is_empty() {
            return Err(ServiceError::malformed("no axis values declared"));
        }

        let mut seen = HashSet::new();
        for axis in &self.axes {
            if axis.id.trim().is_empty() {
                return Err(ServiceError::malformed("axis value has an empty id"));
            }
            if !seen.insert(axis.id.as_str()) {
                return Err(ServiceError::malformed(format!(
                    "axis value '{}' is declared twice",
                    axis.id
                )));
            }
        }

        for suite in &self.suites {
            if suite.name.trim().is_empty() {
                return Err(ServiceError::malformed("suite has an empty name"));
            }
            if suite.dir.trim().is_empty() {
                return Err(ServiceError::malformed(format!(
                    "suite '{}' has an empty working directory",
                    suite.name
                )));
            }
            if suite.command.trim().is_empty() {
                return Err(ServiceError::malformed(format!(
                    "suite '{}' has an empty command",
                    suite.name
                )));
            }
            if let Some(index) = suite
                .before
                .iter()
                .position(|step| step.uses.is_none() && step.run.is_none())
            {
                return Err(ServiceError::malformed(format!(
                    "suite '{}' pre-step {} has neither 'uses' nor 'run'",
                    suite.name,
                    index + 1
                )));
            }
        }

        self.ensure_suites_exist(&self.skip)
    }
}
