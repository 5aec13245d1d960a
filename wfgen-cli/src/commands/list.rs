use crate::commands::generate::load_descriptor;
use crate::output;

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;

use workflow_service::{build_workflow, Workflow};

/// List the job keys the workflow would contain
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Descriptor YAML file (default: built-in Rails catalog)
    #[arg(long, short = 'd', value_name = "FILE")]
    pub descriptor: Option<PathBuf>,
}

/// One line per setup job, followed by its test jobs indented beneath it
pub fn job_tree(workflow: &Workflow) -> Vec<String> {
    let mut lines = Vec::new();
    for (setup_key, setup) in workflow.jobs.iter().filter(|(_, job)| job.needs.is_none()) {
        lines.push(format!("{}  ({})", setup_key, setup.name));
        for (key, _) in workflow
            .jobs
            .iter()
            .filter(|(_, job)| job.needs.as_deref() == Some(setup_key))
        {
            lines.push(format!("  {}", key));
        }
    }
    lines
}

pub fn execute(args: ListArgs) -> Result<()> {
    let descriptor = load_descriptor(args.descriptor.as_deref())?;
    let workflow = build_workflow(&descriptor)?;

    for line in job_tree(&workflow) {
        println!("{}", line);
    }

    let setup_jobs = descriptor.axes.len();
    output::success(&format!(
        "{} setup job(s), {} test job(s)",
        setup_jobs,
        workflow.jobs.len() - setup_jobs
    ));

    Ok(())
}
