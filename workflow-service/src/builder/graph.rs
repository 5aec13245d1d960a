// Job Graph Builder
// Turns descriptor tables into a two-tier workflow: one setup job per axis
// value, then one test job per (axis value, suite) that needs it

use crate::builder::normalize::normalize_key;
use crate::builder::steps;
use crate::descriptor::models::{AxisValue, Descriptor, SuiteDefinition};
use crate::workflow::models::{Job, JobMap, Step, Workflow};
use crate::{ServiceError, ServiceResult};

use std::collections::BTreeMap;

/// Builds the job graph for one descriptor.
///
/// The builder is pure: the same descriptor always produces the same
/// workflow, and the descriptor is never modified.
pub struct JobGraphBuilder<'a> {
    descriptor: &'a Descriptor,
}

impl<'a> JobGraphBuilder<'a> {
    pub fn new(descriptor: &'a Descriptor) -> Self {
        Self { descriptor }
    }

    /// Build the complete workflow document.
    ///
    /// Fails without producing anything if the descriptor is malformed, a
    /// suite references an unknown service, or two jobs share a key.
    pub fn build(&self) -> ServiceResult<Workflow> {
        self.descriptor.validate()?;

        let mut jobs = self.setup_jobs()?;
        let setup_count = jobs.len();
        jobs.extend(self.test_jobs()?)?;

        tracing::info!(
            setup_jobs = setup_count,
            test_jobs = jobs.len() - setup_count,
            "built job graph"
        );

        Ok(Workflow {
            name: self.descriptor.name.clone(),
            on: self.descriptor.on.clone(),
            jobs,
        })
    }

    /// Display name of the setup job for an axis value
    pub fn setup_job_name(&self, axis: &AxisValue) -> String {
        format!(
            "{} ({} / {})",
            self.descriptor.setup_label, axis.id, self.descriptor.runs_on
        )
    }

    /// Job key of the setup job for an axis value
    pub fn setup_job_key(&self, axis: &AxisValue) -> String {
        normalize_key(&self.setup_job_name(axis))
    }

    /// Display name of the test job for a suite on an axis value
    pub fn test_job_name(&self, suite: &SuiteDefinition, axis: &AxisValue) -> String {
        format!("{} ({} / {})", suite.name, axis.id, self.descriptor.runs_on)
    }

    /// Tier 1: one setup job per axis value.
    pub fn setup_jobs(&self) -> ServiceResult<JobMap> {
        let mut jobs = JobMap::new();
        for axis in &self.descriptor.axes {
            let job = self.setup_job(axis)?;
            let key = self.setup_job_key(axis);
            tracing::debug!(key = %key, "setup job");
            jobs.insert(key, job)?;
        }
        Ok(jobs)
    }

    /// Tier 2: one test job per (axis value, active suite), axis-major.
    pub fn test_jobs(&self) -> ServiceResult<JobMap> {
        let mut jobs = JobMap::new();
        for axis in &self.descriptor.axes {
            for suite in self.descriptor.active_suites() {
                let job = self.test_job(axis, suite)?;
                let key = normalize_key(&job.name);
                tracing::debug!(key = %key, needs = ?job.needs, "test job");
                jobs.insert(key, job)?;
            }
        }
        Ok(jobs)
    }

    fn setup_job(&self, axis: &AxisValue) -> ServiceResult<Job> {
        let mut job = Job::new(self.setup_job_name(axis), &self.descriptor.runs_on);
        job.steps = self.base_steps(axis);

        let mut env = BTreeMap::new();
        job.services = self.resolve_services(&axis.id, &axis.services, &mut env)?;
        job.env = env;

        Ok(job)
    }

    fn test_job(&self, axis: &AxisValue, suite: &SuiteDefinition) -> ServiceResult<Job> {
        // Each job owns its copy of the axis environment
        let mut env = axis.env.clone();

        let mut job = Job::new(self.test_job_name(suite, axis), &self.descriptor.runs_on);
        job.needs = Some(self.setup_job_key(axis));

        job.steps = self.base_steps(axis);
        job.steps.extend(suite.before.iter().cloned());
        job.steps.push(steps::exec_in_dir(
            &self.descriptor.command_prefix,
            &suite.command,
            &suite.dir,
        ));

        let mut services = self.resolve_services(&suite.name, &axis.services, &mut env)?;
        services.extend(self.resolve_services(&suite.name, &suite.services, &mut env)?);
        job.services = services;

        // Suite overrides win over anything a service contributed
        env.extend(suite.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        job.env = env;

        Ok(job)
    }

    /// Checkout, runtime setup, optional cache, dependency install
    fn base_steps(&self, axis: &AxisValue) -> Vec<Step> {
        let descriptor = self.descriptor;
        let mut base = vec![
            steps::uses(&descriptor.checkout_action),
            steps::setup_runtime(
                &descriptor.setup_action,
                &descriptor.version_input,
                &axis.id,
                &axis.setup_with,
            ),
        ];
        if axis.cache {
            base.push(steps::dependency_cache(&descriptor.runs_on, &axis.id));
        }
        base.push(steps::run(&descriptor.install_command));
        base
    }

    /// Look up each named service, merging its environment into `env` in
    /// declaration order and collecting its config under its name.
    fn resolve_services(
        &self,
        owner: &str,
        names: &[String],
        env: &mut BTreeMap<String, String>,
    ) -> ServiceResult<BTreeMap<String, serde_yaml::Value>> {
        let mut services = BTreeMap::new();
        for name in names {
            let service =
                self.descriptor
                    .service(name)
                    .ok_or_else(|| ServiceError::UnknownService {
                        suite: owner.to_string(),
                        service: name.clone(),
                    })?;
            env.extend(service.env.iter().map(|(k, v)| (k.clone(), v.clone())));
            services.insert(name.clone(), service.config.clone());
        }
        Ok(services)
    }
}

/// Build the workflow for a descriptor.
pub fn build_workflow(descriptor: &Descriptor) -> ServiceResult<Workflow> {
    JobGraphBuilder::new(descriptor).build()
}
